// Produced-to interfaces for the presentation side.
//
// Menus, labels, and scene loading live outside this crate. The controller
// only ever calls these two narrow traits, so the UI layer (and the tests)
// decide what "showing" and "loading" actually mean.

/// On-screen session status as the controller wants it presented.
pub trait UiPresenter {
    /// The login/entry view — shown at startup and after any disconnect.
    fn show_entry_view(&mut self);

    /// A connection attempt is in progress.
    fn show_connecting_view(&mut self, label: &str);

    /// In a room below the start threshold.
    fn show_waiting_for_players(&mut self);

    /// The start threshold is reached and the match is beginning.
    fn show_match_ready(&mut self);
}

/// Loads the match level. Invoked exactly once per successful match start;
/// scene teardown is not this crate's concern.
pub trait LevelLoader {
    fn load_level(&mut self, name: &str);
}
