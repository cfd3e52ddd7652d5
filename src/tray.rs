//! System tray icon and menu.
//!
//! Two items: trigger a capture, and quit. Like the hotkey listener, the
//! menu channel is polled from the GUI loop each frame rather than
//! handled on a background thread.

use anyhow::{Context, Result};
use tray_icon::{
    Icon, TrayIcon, TrayIconBuilder,
    menu::{Menu, MenuEvent, MenuId, MenuItem},
};

const ICON_SIZE: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayCommand {
    Capture,
    Quit,
}

pub struct Tray {
    // Dropping the TrayIcon removes it from the tray.
    _icon: TrayIcon,
    capture_id: MenuId,
    quit_id: MenuId,
}

impl Tray {
    pub fn new() -> Result<Self> {
        let capture_item = MenuItem::new("Capture (Ctrl+Shift+S)", true, None);
        let quit_item = MenuItem::new("Quit", true, None);
        let capture_id = capture_item.id().clone();
        let quit_id = quit_item.id().clone();

        let menu = Menu::new();
        menu.append_items(&[&capture_item, &quit_item])
            .context("failed to build tray menu")?;

        let icon = TrayIconBuilder::new()
            .with_menu(Box::new(menu))
            .with_tooltip("OCR Snip Tool")
            .with_icon(solid_icon())
            .build()
            .context("failed to create tray icon")?;

        Ok(Self {
            _icon: icon,
            capture_id,
            quit_id,
        })
    }

    /// Drains pending menu events, returning the last recognized command.
    pub fn poll(&self) -> Option<TrayCommand> {
        let mut command = None;
        while let Ok(event) = MenuEvent::receiver().try_recv() {
            if event.id() == &self.capture_id {
                command = Some(TrayCommand::Capture);
            } else if event.id() == &self.quit_id {
                command = Some(TrayCommand::Quit);
            }
        }
        command
    }
}

/// A plain dark square; the tool has no artwork and the tooltip carries
/// the identification.
fn solid_icon() -> Icon {
    let mut rgba = Vec::with_capacity((ICON_SIZE * ICON_SIZE * 4) as usize);
    for _ in 0..ICON_SIZE * ICON_SIZE {
        rgba.extend_from_slice(&[30, 30, 30, 255]);
    }
    Icon::from_rgba(rgba, ICON_SIZE, ICON_SIZE).expect("static icon dimensions are valid")
}
