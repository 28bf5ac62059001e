/*!
 * Per-chunk fallback routing.
 *
 * The router is a small state machine:
 *
 * ```text
 * Start -> TryPrimary -> Done(primary)
 *                     -> TrySecondary -> Done(secondary)
 *                                     -> Done(none)
 * ```
 *
 * The primary adapter is always tried first. The router keeps no state
 * between chunks, so one instance can serve many concurrent chunk tasks.
 */

use log::debug;
use serde::Serialize;
use std::sync::Arc;

use super::adapters::TranslationAdapter;

/// Which adapter produced a chunk's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendTag {
    Primary,
    Secondary,
    None,
}

impl BackendTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for BackendTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// States of one routing run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterState {
    Start,
    TryPrimary,
    TrySecondary,
    Done(RouteOutcome),
}

/// Terminal result for one chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOutcome {
    /// Translated text, `None` when both adapters failed
    pub text: Option<String>,
    pub backend: BackendTag,
}

/// Primary-then-secondary router
#[derive(Clone)]
pub struct FallbackRouter {
    primary: Arc<dyn TranslationAdapter>,
    secondary: Arc<dyn TranslationAdapter>,
}

fn usable(output: Option<String>) -> Option<String> {
    output.filter(|text| !text.trim().is_empty())
}

impl FallbackRouter {
    pub fn new(primary: Arc<dyn TranslationAdapter>, secondary: Arc<dyn TranslationAdapter>) -> Self {
        Self { primary, secondary }
    }

    /// Name of the adapter behind a tag, for reports
    pub fn backend_name(&self, tag: BackendTag) -> &str {
        match tag {
            BackendTag::Primary => self.primary.name(),
            BackendTag::Secondary => self.secondary.name(),
            BackendTag::None => "none",
        }
    }

    /// Advance the state machine by one transition
    pub async fn step(&self, state: RouterState, text: &str, target_lang: &str) -> RouterState {
        match state {
            RouterState::Start => RouterState::TryPrimary,
            RouterState::TryPrimary => match usable(self.primary.translate(text, target_lang).await) {
                Some(translated) => RouterState::Done(RouteOutcome {
                    text: Some(translated),
                    backend: BackendTag::Primary,
                }),
                None => RouterState::TrySecondary,
            },
            RouterState::TrySecondary => match usable(self.secondary.translate(text, target_lang).await) {
                Some(translated) => RouterState::Done(RouteOutcome {
                    text: Some(translated),
                    backend: BackendTag::Secondary,
                }),
                None => RouterState::Done(RouteOutcome {
                    text: None,
                    backend: BackendTag::None,
                }),
            },
            done @ RouterState::Done(_) => done,
        }
    }

    /// Route one chunk to completion
    pub async fn route(&self, text: &str, target_lang: &str) -> RouteOutcome {
        let mut state = RouterState::Start;
        loop {
            state = match state {
                RouterState::Done(outcome) => {
                    debug!("Chunk routed to {} for '{}'", outcome.backend, target_lang);
                    return outcome;
                }
                other => self.step(other, text, target_lang).await,
            };
        }
    }
}

impl std::fmt::Debug for FallbackRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackRouter")
            .field("primary", &self.primary.name())
            .field("secondary", &self.secondary.name())
            .finish()
    }
}
