//! Readiness tracking for the externally hosted provider scripts.
//!
//! The embedder injects the IDKit and CAPTCHA `<script>` tags and reports
//! their load/error events here; this module only owns the bookkeeping.
//! Loaded flags are monotonic within a session: once a script is up it never
//! transitions back, and a failure after a successful load is ignored.

/// Which externally hosted script a readiness event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderScript {
    /// The IDKit widget script
    WorldId,
    /// The reCAPTCHA / hCaptcha api.js script
    Captcha,
}

/// Load state of one externally hosted script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptState {
    /// Injected, load event not seen yet
    #[default]
    Pending,
    /// Load event fired; terminal
    Loaded,
    /// Error event fired
    Failed,
}

#[derive(Debug, Default)]
struct ScriptSlot {
    state: ScriptState,
    retry_used: bool,
}

/// Tracks readiness of every provider script a session depends on.
#[derive(Debug, Default)]
pub struct ScriptRegistry {
    world_id: ScriptSlot,
    captcha: ScriptSlot,
}

impl ScriptRegistry {
    fn slot(&self, script: ProviderScript) -> &ScriptSlot {
        match script {
            ProviderScript::WorldId => &self.world_id,
            ProviderScript::Captcha => &self.captcha,
        }
    }

    fn slot_mut(&mut self, script: ProviderScript) -> &mut ScriptSlot {
        match script {
            ProviderScript::WorldId => &mut self.world_id,
            ProviderScript::Captcha => &mut self.captcha,
        }
    }

    /// Current load state of the given script
    #[must_use]
    pub fn state(&self, script: ProviderScript) -> ScriptState {
        self.slot(script).state
    }

    /// Whether the given script finished loading
    #[must_use]
    pub fn is_loaded(&self, script: ProviderScript) -> bool {
        self.state(script) == ScriptState::Loaded
    }

    /// Records the script's load event. Idempotent; `Loaded` is terminal.
    pub fn mark_loaded(&mut self, script: ProviderScript) {
        self.slot_mut(script).state = ScriptState::Loaded;
    }

    /// Records the script's error event. Ignored once the script is loaded.
    pub fn mark_failed(&mut self, script: ProviderScript) {
        let slot = self.slot_mut(script);
        if slot.state == ScriptState::Loaded {
            tracing::debug!(?script, "Ignoring script failure after successful load");
            return;
        }
        slot.state = ScriptState::Failed;
    }

    /// Claims the single bounded retry for a failed script.
    ///
    /// Returns `true` exactly once per script, resetting its state to
    /// `Pending` so the embedder can re-inject the tag. Every later failure
    /// is terminal.
    pub fn begin_retry(&mut self, script: ProviderScript) -> bool {
        let slot = self.slot_mut(script);
        if slot.state != ScriptState::Failed || slot.retry_used {
            return false;
        }

        slot.retry_used = true;
        slot.state = ScriptState::Pending;
        true
    }
}
