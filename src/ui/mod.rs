//! # UI Binder
//!
//! Wires a host-provided menu overlay to the sync session. The host UI —
//! whatever toolkit it is — is reached through the narrow [`UiSurface`]
//! trait: install the menu markup, show/hide the overlay, read the target
//! input, raise an alert, display the local id.
//!
//! The binder holds no reference to the surface or the session; both are
//! passed into each call, so it composes with whatever owns them.

use log::info;

use crate::session::SyncSession;

/// Capability handle to the host UI.
pub trait UiSurface {
    /// Whether the multiplayer menu markup is already present.
    fn menu_installed(&self) -> bool;

    /// Inject the menu markup (toggle button, overlay with input and
    /// connect/close buttons, local-id label).
    fn install_menu(&mut self);

    fn show_menu(&mut self);

    fn hide_menu(&mut self);

    /// Current contents of the target-peer-id input box.
    fn read_target_input(&self) -> String;

    /// Raise a user-facing message (invalid input, failed dial).
    fn alert(&mut self, message: &str);

    /// Display the local peer id on its label.
    fn set_local_id_label(&mut self, id: &str);
}

/// User interactions forwarded by the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// The multiplayer toggle button was clicked
    OpenMenuClicked,
    /// The overlay's close button was clicked
    CloseClicked,
    /// The overlay's connect button was clicked
    ConnectClicked,
}

/// Binds [`UiEvent`]s to session operations and keeps the local-id label
/// up to date.
#[derive(Default)]
pub struct UiBinder {
    id_displayed: bool,
}

impl UiBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the menu markup if the surface does not have it yet.
    /// Safe to call any number of times.
    pub fn ensure_installed(&self, surface: &mut dyn UiSurface) {
        if !surface.menu_installed() {
            surface.install_menu();
        }
    }

    /// React to one user interaction.
    ///
    /// Connect reads the trimmed input text; empty input raises an alert
    /// and changes nothing. A successful dial hides the overlay; a refused
    /// one surfaces the session's user-visible error instead.
    pub fn handle_event(
        &mut self,
        surface: &mut dyn UiSurface,
        session: &mut SyncSession,
        event: UiEvent,
    ) {
        match event {
            UiEvent::OpenMenuClicked => surface.show_menu(),
            UiEvent::CloseClicked => surface.hide_menu(),
            UiEvent::ConnectClicked => {
                let target = surface.read_target_input().trim().to_string();
                if target.is_empty() {
                    surface.alert("Enter a valid peer id to connect!");
                    return;
                }
                match session.connect_to(&target) {
                    Ok(()) => surface.hide_menu(),
                    Err(e) => surface.alert(&e.to_string()),
                }
            }
        }
    }

    /// One step of the local-id display poll, to be called on a fixed
    /// 1-second cadence until it reports `true`.
    ///
    /// # Returns
    /// `true` once the id is (or already was) displayed — the caller stops
    /// polling then. This retries the display only, never the connection.
    pub fn poll_local_id(&mut self, surface: &mut dyn UiSurface, session: &SyncSession) -> bool {
        if self.id_displayed {
            return true;
        }
        if let Some(id) = session.local_id() {
            surface.set_local_id_label(id);
            info!("Local peer id displayed: {}", id);
            self.id_displayed = true;
        }
        self.id_displayed
    }
}
