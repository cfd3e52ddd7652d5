//! Global capture hotkey (Ctrl+Shift+S).
//!
//! The global-hotkey crate delivers events on an internal channel; the
//! GUI loop polls [`HotkeyListener::poll`] every frame, so the trigger
//! only ever runs pipeline code on the GUI thread.

use anyhow::{Context, Result};
use global_hotkey::{
    GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState,
    hotkey::{Code, HotKey, Modifiers},
};

pub struct HotkeyListener {
    manager: GlobalHotKeyManager,
    hotkey: HotKey,
}

impl HotkeyListener {
    /// Registers Ctrl+Shift+S as the capture hotkey.
    pub fn new() -> Result<Self> {
        let manager = GlobalHotKeyManager::new().context("failed to create hotkey manager")?;
        let hotkey = HotKey::new(Some(Modifiers::CONTROL | Modifiers::SHIFT), Code::KeyS);

        manager
            .register(hotkey)
            .context("failed to register Ctrl+Shift+S")?;

        tracing::info!("global hotkey registered: Ctrl+Shift+S");
        Ok(Self { manager, hotkey })
    }

    /// Returns true when the capture hotkey was pressed since the last
    /// poll. Non-blocking; release events are ignored.
    pub fn poll(&self) -> bool {
        let receiver = GlobalHotKeyEvent::receiver();
        while let Ok(event) = receiver.try_recv() {
            if event.id == self.hotkey.id() && event.state == HotKeyState::Pressed {
                return true;
            }
        }
        false
    }
}

impl Drop for HotkeyListener {
    fn drop(&mut self) {
        let _ = self.manager.unregister(self.hotkey);
    }
}
