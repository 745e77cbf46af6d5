// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Run orchestration.
//!
//! A [`Generator`] owns the configuration of one run and drives a
//! [`Synthesizer`] over a set of root entities, sequentially or on scoped
//! worker threads. The result is a [`GenerationOutput`] holding every
//! artifact plus the converter's [`DispatchIndex`], ready to be handed to
//! an [`Emitter`].
//!
//! # Run
//!
//! ```text
//! Generator::run(roots)
//!   ├── resolve roots        (unknown name → UnknownEntity)
//!   ├── for each root        (cancel checked first)
//!   │     └── Synthesizer::synthesize
//!   └── Synthesizer::finish  → GenerationOutput
//! ```
//!
//! # Parallelism
//!
//! [`Generator::run_parallel`] splits the roots into contiguous chunks, one
//! per worker. Workers share the synthesizer; a failing worker stops the
//! others at their next entity and its error is returned.

use std::{
    io,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering}
    },
    thread
};

use tracing::{debug, info};

use crate::{
    artifact::{ArtifactClass, ArtifactSet},
    classify::{Classifier, StandardTypes, TypeResolver},
    config::GeneratorConfig,
    error::{GenerationError, Result},
    meta::{EntityMeta, MetadataProvider},
    synth::{DispatchIndex, Synthesized, Synthesizer}
};

/// Cooperative cancellation flag shared with a running generator.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Fresh, not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; entities not yet started are not processed.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Sink for finished artifacts.
///
/// Rendering and writing are up to the implementor; I/O errors are handed
/// back unchanged.
pub trait Emitter {
    /// Emit one artifact.
    fn emit(&mut self, artifact: &ArtifactClass) -> io::Result<()>;
}

/// Everything one run produced.
#[derive(Debug)]
pub struct GenerationOutput {
    artifacts: ArtifactSet,
    dispatch:  DispatchIndex,
    processed: Vec<Synthesized>
}

impl GenerationOutput {
    /// Artifact by qualified name.
    pub fn artifact(&self, name: &str) -> Option<&ArtifactClass> {
        self.artifacts.get(name)
    }

    /// All artifacts.
    pub fn artifacts(&self) -> &ArtifactSet {
        &self.artifacts
    }

    /// Dispatch index of the converter.
    pub fn dispatch(&self) -> &DispatchIndex {
        &self.dispatch
    }

    /// Per-root outcomes, in processing order.
    pub fn processed(&self) -> &[Synthesized] {
        &self.processed
    }

    /// Hand every artifact to `emitter`, in name order.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the emitter.
    pub fn emit_to(&self, emitter: &mut dyn Emitter) -> io::Result<()> {
        for artifact in self.artifacts.iter() {
            emitter.emit(artifact)?;
        }
        info!(artifacts = self.artifacts.len(), "artifacts emitted");
        Ok(())
    }
}

/// Configured generator.
pub struct Generator<'a> {
    provider: &'a dyn MetadataProvider,
    resolver: Arc<dyn TypeResolver>,
    config:   GeneratorConfig,
    cancel:   CancelToken
}

impl<'a> Generator<'a> {
    /// Generator over `provider` with the standard type table.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Config`] if `config` does not validate.
    pub fn new(provider: &'a dyn MetadataProvider, config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            provider,
            resolver: Arc::new(StandardTypes::new()),
            config,
            cancel: CancelToken::new()
        })
    }

    /// Replace the type resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl TypeResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Token cancelling this generator's runs.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Run configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Synthesize `roots` (and their supertypes) on the calling thread.
    ///
    /// Roots that are not entities are skipped.
    ///
    /// # Errors
    ///
    /// - [`GenerationError::UnknownEntity`] for a root the provider lacks
    /// - [`GenerationError::Cancelled`] when cancelled mid-run
    /// - any synthesis error, which aborts the run
    pub fn run(&self, roots: &[&str]) -> Result<GenerationOutput> {
        let entities = self.resolve(roots)?;
        info!(roots = entities.len(), "generation started");
        let synth = self.synthesizer();
        let processed = self.process(&synth, &entities, &AtomicBool::new(false))?;
        self.finish(synth, processed)
    }

    /// [`run`](Self::run) over every entity inside the base package, in
    /// name order.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub fn run_all(&self) -> Result<GenerationOutput> {
        let roots = self.discover();
        let names: Vec<&str> = roots.iter().map(|entity| entity.name.as_str()).collect();
        self.run(&names)
    }

    /// [`run`](Self::run) on up to `workers` scoped threads.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run); additionally
    /// [`GenerationError::WorkerPanicked`] if a worker panics.
    pub fn run_parallel(&self, roots: &[&str], workers: usize) -> Result<GenerationOutput> {
        let entities = self.resolve(roots)?;
        let workers = workers.clamp(1, entities.len().max(1));
        let chunk = entities.len().div_ceil(workers).max(1);
        info!(roots = entities.len(), workers, "parallel generation started");

        let synth = self.synthesizer();
        let failed = AtomicBool::new(false);
        let outcomes: Vec<Result<Vec<Synthesized>>> = thread::scope(|scope| {
            let handles: Vec<_> = entities
                .chunks(chunk)
                .map(|part| {
                    let (synth, failed) = (&synth, &failed);
                    scope.spawn(move || {
                        let result = self.process(synth, part, failed);
                        if result.is_err() {
                            failed.store(true, Ordering::SeqCst);
                        }
                        result
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or(Err(GenerationError::WorkerPanicked))
                })
                .collect()
        });

        let mut processed = Vec::with_capacity(entities.len());
        for outcome in outcomes {
            processed.extend(outcome?);
        }
        self.finish(synth, processed)
    }

    fn synthesizer(&self) -> Synthesizer<'_> {
        Synthesizer::new(Classifier::new(
            self.provider,
            self.resolver.as_ref(),
            &self.config
        ))
    }

    fn resolve(&self, roots: &[&str]) -> Result<Vec<&'a EntityMeta>> {
        roots
            .iter()
            .map(|name| {
                self.provider
                    .class_by_name(name)
                    .ok_or_else(|| GenerationError::UnknownEntity {
                        name: (*name).to_string()
                    })
            })
            .collect()
    }

    fn discover(&self) -> Vec<&'a EntityMeta> {
        let prefix = format!("{}.", self.config.base_package);
        let mut roots: Vec<_> = self
            .provider
            .all_known_classes()
            .into_iter()
            .filter(|class| class.is_entity() && class.name.starts_with(&prefix))
            .collect();
        roots.sort_by(|a, b| a.name.cmp(&b.name));
        roots
    }

    fn process(
        &self,
        synth: &Synthesizer<'_>,
        entities: &[&EntityMeta],
        failed: &AtomicBool
    ) -> Result<Vec<Synthesized>> {
        let mut processed = Vec::with_capacity(entities.len());
        for entity in entities {
            if self.cancel.is_cancelled() {
                info!(entity = %entity.name, "generation cancelled");
                return Err(GenerationError::Cancelled);
            }
            if failed.load(Ordering::SeqCst) {
                break;
            }
            if !entity.is_entity() {
                info!(class = %entity.name, "not an entity, skipped");
                continue;
            }
            debug!(entity = %entity.name, "processing root");
            processed.push(synth.synthesize(entity)?);
        }
        Ok(processed)
    }

    fn finish(
        &self,
        synth: Synthesizer<'_>,
        processed: Vec<Synthesized>
    ) -> Result<GenerationOutput> {
        let (artifacts, dispatch) = synth.finish()?;
        info!(
            processed = processed.len(),
            artifacts = artifacts.len(),
            "generation finished"
        );
        Ok(GenerationOutput {
            artifacts,
            dispatch,
            processed
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        classify::CollectionKind,
        config::ConfigError,
        meta::{AnnotationMeta, FieldMeta, InMemoryProvider, MethodMeta, TypeRef}
    };

    fn entity(name: &str) -> EntityMeta {
        EntityMeta::new(name)
            .annotated(AnnotationMeta::new("Entity"))
            .field(
                FieldMeta::new("id", TypeRef::new("java.lang.Long"))
                    .annotated(AnnotationMeta::new("Id"))
            )
            .method(MethodMeta::getter("id", TypeRef::new("java.lang.Long")))
    }

    fn provider() -> InMemoryProvider {
        [
            entity("shop.model.User"),
            entity("shop.model.Order"),
            entity("shop.model.Refund"),
            EntityMeta::new("shop.model.Money"),
            entity("other.Outside")
        ]
        .into_iter()
        .collect()
    }

    fn config() -> GeneratorConfig {
        GeneratorConfig::new("shop.model", "shop.api", "shop.data")
    }

    #[derive(Default)]
    struct Collect(Vec<String>);

    impl Emitter for Collect {
        fn emit(&mut self, artifact: &ArtifactClass) -> io::Result<()> {
            self.0.push(artifact.name.clone());
            Ok(())
        }
    }

    struct Broken;

    impl Emitter for Broken {
        fn emit(&mut self, _: &ArtifactClass) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    #[test]
    fn invalid_config_rejected() {
        let provider = provider();
        let err = Generator::new(&provider, GeneratorConfig::new("", "a", "b"))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            GenerationError::Config(ConfigError::MissingOption("basePackage"))
        ));
    }

    #[test]
    fn unknown_root() {
        let provider = provider();
        let generator = Generator::new(&provider, config()).unwrap();
        assert!(matches!(
            generator.run(&["shop.model.Ghost"]),
            Err(GenerationError::UnknownEntity { name }) if name == "shop.model.Ghost"
        ));
    }

    #[test]
    fn non_entity_root_skipped() {
        let provider = provider();
        let output = Generator::new(&provider, config())
            .unwrap()
            .run(&["shop.model.Money", "shop.model.User"])
            .unwrap();
        assert_eq!(output.processed().len(), 1);
        assert!(output.artifact("shop.api.dto.MoneyDTO").is_none());
        assert_eq!(output.dispatch().len(), 1);
    }

    #[test]
    fn run_all_stays_in_base_package() {
        let provider = provider();
        let output = Generator::new(&provider, config()).unwrap().run_all().unwrap();
        let roots: Vec<_> = output
            .processed()
            .iter()
            .map(|done| done.entity.as_str())
            .collect();
        assert_eq!(roots, ["shop.model.Order", "shop.model.Refund", "shop.model.User"]);
        assert_eq!(output.artifacts().len(), 7);
    }

    #[test]
    fn parallel_matches_sequential() {
        let provider = provider();
        let generator = Generator::new(&provider, config()).unwrap();
        let roots = ["shop.model.User", "shop.model.Order", "shop.model.Refund"];
        let sequential = generator.run(&roots).unwrap();
        let parallel = generator.run_parallel(&roots, 4).unwrap();
        assert_eq!(sequential.artifacts(), parallel.artifacts());
        assert_eq!(sequential.dispatch(), parallel.dispatch());
        assert_eq!(parallel.processed().len(), 3);
    }

    #[test]
    fn cancelled_before_start() {
        let provider = provider();
        let generator = Generator::new(&provider, config()).unwrap();
        generator.cancel_token().cancel();
        assert!(matches!(
            generator.run(&["shop.model.User"]),
            Err(GenerationError::Cancelled)
        ));
        assert!(matches!(
            generator.run_parallel(&["shop.model.User", "shop.model.Order"], 2),
            Err(GenerationError::Cancelled)
        ));
    }

    #[test]
    fn emission_in_name_order_and_errors_propagate() {
        let provider = provider();
        let output = Generator::new(&provider, config())
            .unwrap()
            .run(&["shop.model.User"])
            .unwrap();

        let mut collect = Collect::default();
        output.emit_to(&mut collect).unwrap();
        assert_eq!(collect.0, [
            "shop.api.DtoConversionService",
            "shop.api.dto.UserDTO",
            "shop.data.dao.IUserDAO"
        ]);

        let err = output.emit_to(&mut Broken).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn custom_resolver() {
        let provider: InMemoryProvider = [entity("shop.model.User").field(FieldMeta::new(
            "tags",
            TypeRef::generic("shop.util.Bag", [TypeRef::new("java.lang.String")])
        ))]
        .into_iter()
        .collect();
        let output = Generator::new(&provider, config())
            .unwrap()
            .with_resolver(
                StandardTypes::new().with_collection("shop.util.Bag", CollectionKind::Bag)
            )
            .run(&["shop.model.User"])
            .unwrap();
        let dto = output.artifact("shop.api.dto.UserDTO").unwrap();
        assert!(dto.field("tags").is_some());
    }
}
