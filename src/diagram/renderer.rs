//! Diagram renderer
//!
//! Owns the lifecycle of one on-screen diagram: every time the source changes
//! (or the renderer is remounted) a new render attempt is started on a worker
//! thread and the outcome goes back to `Loading`. Workers report through a
//! channel that the UI drains on tick. Each result carries the id of the
//! attempt that produced it, and only the instance's current attempt may
//! update the outcome, so slow superseded attempts can never overwrite a
//! newer result.

use super::engine::EngineHandle;
use super::error::{DiagramError, DiagramResult};
use super::render::Markup;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a renderer instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(u64);

impl InstanceId {
    pub fn next() -> Self {
        InstanceId(NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed))
    }
}

/// Identifier of a single render attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderId {
    instance: InstanceId,
    attempt: u64,
}

impl RenderId {
    pub fn new(instance: InstanceId, attempt: u64) -> Self {
        Self { instance, attempt }
    }
}

impl fmt::Display for RenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "diagram-{}-{}", self.instance.0, self.attempt)
    }
}

/// What the renderer currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Loading,
    Success(Markup),
    /// Error banner plus the trimmed source shown verbatim
    Failure { message: String, source: String },
}

impl RenderOutcome {
    pub fn is_loading(&self) -> bool {
        matches!(self, RenderOutcome::Loading)
    }
}

/// Result of one attempt, sent back from the worker thread
#[derive(Debug)]
pub struct RenderMessage {
    pub id: RenderId,
    pub result: DiagramResult<Markup>,
}

/// State machine behind a diagram view
pub struct DiagramRenderer {
    instance: InstanceId,
    engine: EngineHandle,
    title: Option<String>,
    source: String,
    attempts: u64,
    current: Option<RenderId>,
    outcome: RenderOutcome,
    sender: Sender<RenderMessage>,
    receiver: Receiver<RenderMessage>,
}

impl fmt::Debug for DiagramRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagramRenderer")
            .field("instance", &self.instance)
            .field("title", &self.title)
            .field("current", &self.current)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

impl DiagramRenderer {
    /// Mount a renderer and start its first attempt
    pub fn new(engine: EngineHandle, source: &str, title: Option<String>) -> Self {
        let (sender, receiver) = mpsc::channel();
        let mut renderer = Self {
            instance: InstanceId::next(),
            engine,
            title,
            source: source.trim().to_string(),
            attempts: 0,
            current: None,
            outcome: RenderOutcome::Loading,
            sender,
            receiver,
        };
        renderer.request();
        renderer
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Trimmed source of the current attempt
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn outcome(&self) -> &RenderOutcome {
        &self.outcome
    }

    #[cfg(test)]
    pub fn current_id(&self) -> Option<RenderId> {
        self.current
    }

    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    /// Replace the source, starting a new attempt if it changed
    pub fn set_source(&mut self, source: &str) -> bool {
        let trimmed = source.trim();
        if trimmed == self.source {
            return false;
        }
        self.source = trimmed.to_string();
        self.request();
        true
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    /// Start a fresh attempt for the same source
    pub fn remount(&mut self) {
        self.request();
    }

    fn request(&mut self) {
        self.attempts += 1;
        let id = RenderId::new(self.instance, self.attempts);
        self.current = Some(id);
        self.outcome = RenderOutcome::Loading;

        let engine = self.engine.clone();
        let source = self.source.clone();
        let tx = self.sender.clone();

        tracing::debug!("Starting render attempt {}", id);
        thread::spawn(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                engine.engine().validate(&source)?;
                engine.engine().render(&id, &source)
            }))
            .unwrap_or_else(|payload| Err(DiagramError::Panicked(panic_message(payload))));
            // The renderer may have been unmounted in the meantime
            let _ = tx.send(RenderMessage { id, result });
        });
    }

    /// Drain finished attempts, returns true if the outcome changed
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.receiver.try_recv() {
                Ok(message) => changed |= self.apply(message),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        changed
    }

    /// Apply one attempt's result if it belongs to the current attempt
    pub fn apply(&mut self, message: RenderMessage) -> bool {
        if self.current != Some(message.id) {
            tracing::debug!("Dropping stale result for {}", message.id);
            return false;
        }

        self.outcome = match message.result {
            Ok(markup) => RenderOutcome::Success(markup),
            Err(err) => {
                tracing::warn!("Render {} failed: {}", message.id, err);
                RenderOutcome::Failure {
                    message: err.user_message(),
                    source: self.source.clone(),
                }
            }
        };
        true
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::engine::{DiagramEngine, EngineConfig};
    use crate::diagram::error::GENERIC_RENDER_FAILURE;
    use std::collections::HashSet;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    fn engine() -> EngineHandle {
        EngineHandle::flowchart(EngineConfig::default())
    }

    /// Poll until the renderer leaves `Loading`
    fn settle(renderer: &mut DiagramRenderer) -> &RenderOutcome {
        let deadline = Instant::now() + Duration::from_secs(5);
        while renderer.outcome().is_loading() && Instant::now() < deadline {
            renderer.poll();
            thread::sleep(Duration::from_millis(2));
        }
        renderer.outcome()
    }

    #[derive(Default)]
    struct ScriptedEngine {
        configured: AtomicUsize,
        renders: AtomicUsize,
        behavior: Behavior,
    }

    #[derive(Default)]
    enum Behavior {
        #[default]
        Succeed,
        EmptyError,
        Panic,
    }

    impl DiagramEngine for ScriptedEngine {
        fn configure(&self, _config: &EngineConfig) -> bool {
            self.configured.fetch_add(1, Ordering::SeqCst) == 0
        }

        fn validate(&self, _source: &str) -> DiagramResult<()> {
            Ok(())
        }

        fn render(&self, _id: &RenderId, source: &str) -> DiagramResult<Markup> {
            self.renders.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Succeed => {
                    let chart = crate::diagram::parser::parse_flowchart(source)?;
                    crate::diagram::render::render_flowchart(
                        &chart,
                        &crate::diagram::render::GlyphPalette::new(Default::default()),
                        Default::default(),
                    )
                }
                Behavior::EmptyError => Err(DiagramError::Render(String::new())),
                Behavior::Panic => panic!("engine exploded"),
            }
        }
    }

    #[test]
    fn test_valid_source_succeeds() {
        let mut renderer = DiagramRenderer::new(engine(), "flowchart TB\nA-->B", None);
        match settle(&mut renderer) {
            RenderOutcome::Success(markup) => assert!(!markup.is_empty()),
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_source_fails_with_verbatim_source() {
        let mut renderer = DiagramRenderer::new(engine(), "flowchart TB\nA-->", None);
        match settle(&mut renderer) {
            RenderOutcome::Failure { message, source } => {
                assert!(!message.is_empty());
                assert_eq!(source, "flowchart TB\nA-->");
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_failure_shows_trimmed_source() {
        let raw = "  \n\tflowchart TB\nA-->  \n\n";
        let mut renderer = DiagramRenderer::new(engine(), raw, Some("Broken".to_string()));
        match settle(&mut renderer) {
            RenderOutcome::Failure { source, .. } => assert_eq!(source, raw.trim()),
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(renderer.title(), Some("Broken"));
    }

    #[test]
    fn test_render_ids_are_unique_across_attempts_and_instances() {
        let mut ids = HashSet::new();
        let mut first = DiagramRenderer::new(engine(), "flowchart TB\nA-->B", None);
        let mut second = DiagramRenderer::new(engine(), "flowchart TB\nA-->B", None);

        for _ in 0..10 {
            assert!(ids.insert(first.current_id().unwrap()));
            assert!(ids.insert(second.current_id().unwrap()));
            first.remount();
            second.remount();
        }
        let rendered: HashSet<String> = ids.iter().map(|id| id.to_string()).collect();
        assert_eq!(rendered.len(), 20);
    }

    #[test]
    fn test_change_enters_loading_then_settles() {
        let mut renderer = DiagramRenderer::new(engine(), "flowchart TB\nA-->B", None);
        settle(&mut renderer);

        assert!(renderer.set_source("flowchart LR\nA-->B"));
        assert!(renderer.outcome().is_loading());
        assert!(matches!(settle(&mut renderer), RenderOutcome::Success(_)));

        // Unchanged source does not start a new attempt
        let id = renderer.current_id();
        assert!(!renderer.set_source("  flowchart LR\nA-->B  "));
        assert_eq!(renderer.current_id(), id);
    }

    #[test]
    fn test_stale_result_is_dropped() {
        let mut renderer = DiagramRenderer::new(engine(), "flowchart TB\nA-->", None);
        let first = renderer.current_id().unwrap();
        renderer.set_source("flowchart TB\nA-->B");
        let second = renderer.current_id().unwrap();
        assert_ne!(first, second);

        // First attempt resolving late must not touch the outcome
        let stale = RenderMessage {
            id: first,
            result: Err(DiagramError::syntax(2, "expected node after link '-->'")),
        };
        assert!(!renderer.apply(stale));
        assert!(renderer.outcome().is_loading());

        assert!(matches!(settle(&mut renderer), RenderOutcome::Success(_)));
        assert_eq!(renderer.current_id(), Some(second));
    }

    #[test]
    fn test_empty_error_message_uses_fallback() {
        let scripted = Arc::new(ScriptedEngine {
            behavior: Behavior::EmptyError,
            ..Default::default()
        });
        let handle = EngineHandle::initialize(scripted, EngineConfig::default());
        let mut renderer = DiagramRenderer::new(handle, "flowchart TB\nA-->B", None);
        match settle(&mut renderer) {
            RenderOutcome::Failure { message, .. } => assert_eq!(message, GENERIC_RENDER_FAILURE),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_engine_panic_becomes_failure() {
        let scripted = Arc::new(ScriptedEngine {
            behavior: Behavior::Panic,
            ..Default::default()
        });
        let handle = EngineHandle::initialize(scripted, EngineConfig::default());
        let mut renderer = DiagramRenderer::new(handle, "flowchart TB\nA-->B", None);
        match settle(&mut renderer) {
            RenderOutcome::Failure { message, source } => {
                assert!(message.contains("engine exploded"));
                assert_eq!(source, "flowchart TB\nA-->B");
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_engine_configured_once_for_many_renderers() {
        let scripted = Arc::new(ScriptedEngine::default());
        let handle = EngineHandle::initialize(scripted.clone(), EngineConfig::default());

        let mut renderers: Vec<DiagramRenderer> = (0..5)
            .map(|_| DiagramRenderer::new(handle.clone(), "flowchart TB\nA-->B", None))
            .collect();
        for renderer in renderers.iter_mut() {
            assert!(matches!(settle(renderer), RenderOutcome::Success(_)));
        }

        assert_eq!(scripted.configured.load(Ordering::SeqCst), 1);
        assert_eq!(scripted.renders.load(Ordering::SeqCst), 5);
    }
}
