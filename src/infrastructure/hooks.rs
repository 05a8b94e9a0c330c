use crate::domain::ItemAvailability;
use anyhow::Result;
use std::path::PathBuf;

/// Context provided to write hooks
#[derive(Debug, Clone)]
pub struct WriteContext {
    pub item_id: String,
    pub item_path: PathBuf,
    pub root_dir: PathBuf,
}

/// Trait for plugins that respond to availability writes
pub trait WriteHook: Send + Sync {
    /// Called after an item's availability has been written to disk
    fn on_availability_written(
        &self,
        context: &WriteContext,
        item: &ItemAvailability,
    ) -> Result<()>;

    fn name(&self) -> &str;
}

pub struct HookRegistry {
    hooks: Vec<Box<dyn WriteHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    pub fn register<H>(&mut self, hook: H)
    where
        H: WriteHook + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// A failing hook is logged and skipped; the write itself already succeeded.
    pub fn execute_write_hooks(&self, context: &WriteContext, item: &ItemAvailability) {
        for hook in &self.hooks {
            if let Err(e) = hook.on_availability_written(context, item) {
                log::warn!("Hook '{}' failed for item {}: {:#}", hook.name(), context.item_id, e);
            }
        }
    }

    pub fn list_hooks(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHook(Arc<AtomicUsize>);

    impl WriteHook for CountingHook {
        fn on_availability_written(&self, _: &WriteContext, _: &ItemAvailability) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn name(&self) -> &str {
            "Counting"
        }
    }

    struct FailingHook;

    impl WriteHook for FailingHook {
        fn on_availability_written(&self, _: &WriteContext, _: &ItemAvailability) -> Result<()> {
            anyhow::bail!("disk full")
        }

        fn name(&self) -> &str {
            "Failing"
        }
    }

    #[test]
    fn test_failing_hook_does_not_stop_others() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = HookRegistry::new();
        registry.register(FailingHook);
        registry.register(CountingHook(calls.clone()));

        let context = WriteContext {
            item_id: "tent".to_string(),
            item_path: PathBuf::from("tent.json"),
            root_dir: PathBuf::from("."),
        };
        registry.execute_write_hooks(&context, &ItemAvailability::new("tent"));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(registry.list_hooks(), vec!["Failing", "Counting"]);
    }
}
