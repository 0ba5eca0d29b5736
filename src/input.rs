//! Keyboard shortcut mapping

use crate::sim::GamePhase;

/// Page-wide shortcut actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    GoHome,
    ToggleLights,
    ToggleContrast,
    ToggleMotion,
}

/// Runner game commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerCommand {
    Jump,
    Restart,
}

/// Map a `KeyboardEvent.key` to a page action (case-insensitive)
pub fn page_action(key: &str) -> Option<PageAction> {
    match key.to_lowercase().as_str() {
        "h" => Some(PageAction::GoHome),
        "r" => Some(PageAction::ToggleLights),
        "c" => Some(PageAction::ToggleContrast),
        "m" => Some(PageAction::ToggleMotion),
        _ => None,
    }
}

/// Map a key press to a runner command. `Space` is matched on
/// `KeyboardEvent.code`; restart only applies once the run is over.
pub fn runner_command(key: &str, code: &str, phase: GamePhase) -> Option<RunnerCommand> {
    if code == "Space" {
        return Some(RunnerCommand::Jump);
    }
    if key.eq_ignore_ascii_case("r") && phase == GamePhase::GameOver {
        return Some(RunnerCommand::Restart);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_shortcuts() {
        assert_eq!(page_action("h"), Some(PageAction::GoHome));
        assert_eq!(page_action("H"), Some(PageAction::GoHome));
        assert_eq!(page_action("r"), Some(PageAction::ToggleLights));
        assert_eq!(page_action("C"), Some(PageAction::ToggleContrast));
        assert_eq!(page_action("m"), Some(PageAction::ToggleMotion));
        assert_eq!(page_action("x"), None);
        assert_eq!(page_action("Enter"), None);
    }

    #[test]
    fn test_runner_space_jumps_in_any_phase() {
        for phase in [GamePhase::NotStarted, GamePhase::Running, GamePhase::GameOver] {
            assert_eq!(runner_command(" ", "Space", phase), Some(RunnerCommand::Jump));
        }
    }

    #[test]
    fn test_runner_restart_only_when_over() {
        assert_eq!(runner_command("r", "KeyR", GamePhase::Running), None);
        assert_eq!(
            runner_command("R", "KeyR", GamePhase::GameOver),
            Some(RunnerCommand::Restart)
        );
        assert_eq!(runner_command("x", "KeyX", GamePhase::GameOver), None);
    }
}
