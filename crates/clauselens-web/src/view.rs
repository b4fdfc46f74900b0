//! Explicit view state machine for the UI.
//!
//! Three views; the analysis view carries an optional selected contract id.
//! Analysis with no resolvable selection is valid but degraded — the handler
//! renders an empty-state notice instead of failing.

/// Which view the UI is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Upload,
    Analysis,
}

#[derive(Debug, Clone)]
pub struct ViewState {
    current: View,
    selected: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self { current: View::Dashboard, selected: None }
    }
}

impl ViewState {
    pub fn current(&self) -> View {
        self.current
    }

    /// Id of the contract the analysis view should show, if any.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Explicit navigation; allowed from any state. The selection is kept so
    /// returning to the analysis view shows the same contract.
    pub fn go_dashboard(&mut self) {
        self.current = View::Dashboard;
    }

    /// Explicit navigation; allowed from any state.
    pub fn go_upload(&mut self) {
        self.current = View::Upload;
    }

    /// Enter the analysis view without changing the selection.
    pub fn go_analysis(&mut self) {
        self.current = View::Analysis;
    }

    /// Select a contract and enter the analysis view. Used after a successful
    /// upload and when a listed contract is opened from the dashboard.
    pub fn open_contract(&mut self, contract_id: impl Into<String>) {
        self.selected = Some(contract_id.into());
        self.current = View::Analysis;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_dashboard() {
        let vs = ViewState::default();
        assert_eq!(vs.current(), View::Dashboard);
        assert_eq!(vs.selected(), None);
    }

    #[test]
    fn test_upload_to_analysis_after_success() {
        let mut vs = ViewState::default();
        vs.go_upload();
        assert_eq!(vs.current(), View::Upload);
        vs.open_contract("contract-1");
        assert_eq!(vs.current(), View::Analysis);
        assert_eq!(vs.selected(), Some("contract-1"));
    }

    #[test]
    fn test_dashboard_to_analysis_on_selection() {
        let mut vs = ViewState::default();
        vs.open_contract("contract-2");
        assert_eq!(vs.current(), View::Analysis);
        assert_eq!(vs.selected(), Some("contract-2"));
    }

    #[test]
    fn test_navigation_keeps_selection() {
        let mut vs = ViewState::default();
        vs.open_contract("contract-3");
        vs.go_dashboard();
        assert_eq!(vs.current(), View::Dashboard);
        assert_eq!(vs.selected(), Some("contract-3"));
        vs.go_analysis();
        assert_eq!(vs.current(), View::Analysis);
        assert_eq!(vs.selected(), Some("contract-3"));
    }

    #[test]
    fn test_analysis_without_selection_is_reachable() {
        let mut vs = ViewState::default();
        vs.go_analysis();
        assert_eq!(vs.current(), View::Analysis);
        assert_eq!(vs.selected(), None);
    }

    #[test]
    fn test_reselection_replaces_contract() {
        let mut vs = ViewState::default();
        vs.open_contract("contract-a");
        vs.open_contract("contract-b");
        assert_eq!(vs.selected(), Some("contract-b"));
    }
}
