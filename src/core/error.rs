//=========================================================================
// Core Errors
//=========================================================================
//
// Error types surfaced by the scene machine. None of them halt the tick
// loop: callers log them and fall back to a visible placeholder.
//
// Media errors live next to the media backend contract in
// `core::media`.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::scene::SceneKey;

//=== ConfigurationError ==================================================

/// A transition or lookup referenced a scene that has no handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigurationError<S: SceneKey> {
    #[error("no handler registered for scene {0:?}")]
    UnregisteredScene(S),
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestScene {
        Missing,
    }

    impl SceneKey for TestScene {}

    #[test]
    fn display_names_the_scene() {
        let err = ConfigurationError::UnregisteredScene(TestScene::Missing);
        assert_eq!(err.to_string(), "no handler registered for scene Missing");
    }
}
