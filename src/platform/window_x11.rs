//! X11 window implementation with Cairo surface.

use crate::core::types::{KeyEvent, MouseEvent};
use crate::platform::error::PlatformError;
use log::{debug, trace};
use std::ffi::CString;
use std::ptr;
use x11::xlib;

const PRIMARY_BUTTON: u32 = xlib::Button1;

pub struct WindowX11 {
    display: *mut xlib::Display,
    window: xlib::Window,
    width: i32,
    height: i32,
    wm_delete_window: xlib::Atom,
    should_close: bool,
    screen: i32,
    resized: bool,
    exposed: bool,

    // Only the primary button drives a pan
    primary_down: bool,

    // Pending events for external consumption
    pending_mouse_events: Vec<MouseEvent>,
    pending_key_events: Vec<KeyEvent>,
}

impl WindowX11 {
    pub fn new() -> Self {
        Self {
            display: ptr::null_mut(),
            window: 0,
            width: 0,
            height: 0,
            wm_delete_window: 0,
            should_close: false,
            screen: 0,
            resized: false,
            exposed: true,
            primary_down: false,
            pending_mouse_events: Vec::new(),
            pending_key_events: Vec::new(),
        }
    }

    pub fn create(&mut self, width: i32, height: i32, title: &str) -> Result<(), PlatformError> {
        let title_c = CString::new(title)?;
        let wm_delete = CString::new("WM_DELETE_WINDOW")?;

        unsafe {
            self.display = xlib::XOpenDisplay(ptr::null());
            if self.display.is_null() {
                return Err(PlatformError::DisplayUnavailable);
            }

            self.screen = xlib::XDefaultScreen(self.display);
            let root = xlib::XRootWindow(self.display, self.screen);

            self.window = xlib::XCreateSimpleWindow(
                self.display,
                root,
                0,
                0,
                width as u32,
                height as u32,
                0,
                xlib::XBlackPixel(self.display, self.screen),
                xlib::XBlackPixel(self.display, self.screen),
            );

            self.width = width;
            self.height = height;

            xlib::XStoreName(self.display, self.window, title_c.as_ptr());

            // Select events
            xlib::XSelectInput(
                self.display,
                self.window,
                xlib::ExposureMask
                    | xlib::ButtonPressMask
                    | xlib::ButtonReleaseMask
                    | xlib::PointerMotionMask
                    | xlib::KeyPressMask
                    | xlib::KeyReleaseMask
                    | xlib::StructureNotifyMask,
            );

            // WM_DELETE_WINDOW protocol
            self.wm_delete_window =
                xlib::XInternAtom(self.display, wm_delete.as_ptr(), xlib::False);
            xlib::XSetWMProtocols(
                self.display,
                self.window,
                &mut self.wm_delete_window as *mut _,
                1,
            );

            xlib::XMapWindow(self.display, self.window);
            xlib::XFlush(self.display);
        }

        debug!("created {}x{} window {:#x}", width, height, self.window);
        Ok(())
    }

    /// Create a Cairo context for the current window using cairo-sys FFI.
    pub fn create_cairo_context(&self) -> Result<cairo::Context, PlatformError> {
        unsafe {
            let visual = xlib::XDefaultVisual(self.display, self.screen);

            let surface_ptr = cairo_sys::cairo_xlib_surface_create(
                self.display,
                self.window,
                visual,
                self.width,
                self.height,
            );

            if surface_ptr.is_null() {
                return Err(PlatformError::SurfaceCreation(self.window as u64));
            }

            let cr_ptr = cairo_sys::cairo_create(surface_ptr);
            // Surface is now referenced by the context, release our ref
            cairo_sys::cairo_surface_destroy(surface_ptr);

            if cr_ptr.is_null() {
                return Err(PlatformError::SurfaceCreation(self.window as u64));
            }

            // Wrap the raw pointer in cairo-rs Context (takes ownership)
            Ok(cairo::Context::from_raw_full(cr_ptr))
        }
    }

    /// Process pending X11 events. Returns false if window should close.
    pub fn poll_events(&mut self) -> bool {
        if self.should_close {
            return false;
        }

        self.pending_mouse_events.clear();
        self.pending_key_events.clear();

        unsafe {
            while xlib::XPending(self.display) > 0 {
                let mut event: xlib::XEvent = std::mem::zeroed();
                xlib::XNextEvent(self.display, &mut event);

                match event.get_type() {
                    xlib::Expose => self.exposed = true,
                    xlib::ButtonPress | xlib::ButtonRelease => {
                        let btn = event.button;
                        let pressed = event.get_type() == xlib::ButtonPress;
                        if let Some(e) = self.primary_button(btn.button, btn.x, btn.y, pressed) {
                            self.pending_mouse_events.push(e);
                        }
                    }
                    xlib::MotionNotify => {
                        let motion = event.motion;
                        self.pending_mouse_events.push(MouseEvent {
                            x: motion.x as f64,
                            y: motion.y as f64,
                            button: if self.primary_down { PRIMARY_BUTTON as u8 } else { 0 },
                            pressed: false,
                            released: false,
                            dragging: self.primary_down,
                        });
                    }
                    xlib::KeyPress | xlib::KeyRelease => {
                        let key = event.key;
                        self.pending_key_events.push(KeyEvent {
                            keycode: key.keycode,
                            pressed: event.get_type() == xlib::KeyPress,
                            ctrl: key.state & xlib::ControlMask != 0,
                        });
                    }
                    xlib::ConfigureNotify => {
                        let configure = event.configure;
                        if configure.width != self.width || configure.height != self.height {
                            self.width = configure.width;
                            self.height = configure.height;
                            self.resized = true;
                            self.exposed = true;
                        }
                    }
                    xlib::ClientMessage => {
                        let cm = event.client_message;
                        if cm.data.get_long(0) as xlib::Atom == self.wm_delete_window {
                            self.should_close = true;
                            return false;
                        }
                    }
                    other => {
                        trace!("unhandled X11 event type {}", other);
                    }
                }
            }
        }

        !self.should_close
    }

    /// Track the primary button and turn its press/release into an event.
    /// Other buttons (middle, right, wheel) are dropped.
    fn primary_button(
        &mut self,
        button: u32,
        x: i32,
        y: i32,
        pressed: bool,
    ) -> Option<MouseEvent> {
        if button != PRIMARY_BUTTON {
            return None;
        }
        self.primary_down = pressed;
        Some(MouseEvent {
            x: x as f64,
            y: y as f64,
            button: PRIMARY_BUTTON as u8,
            pressed,
            released: !pressed,
            dragging: false,
        })
    }

    /// Drain pending mouse events.
    pub fn take_mouse_events(&mut self) -> Vec<MouseEvent> {
        std::mem::take(&mut self.pending_mouse_events)
    }

    /// Drain pending key events.
    pub fn take_key_events(&mut self) -> Vec<KeyEvent> {
        std::mem::take(&mut self.pending_key_events)
    }

    /// True once after the window size changed.
    pub fn take_resized(&mut self) -> bool {
        std::mem::take(&mut self.resized)
    }

    /// True once after the window contents were damaged or resized.
    pub fn take_damaged(&mut self) -> bool {
        std::mem::take(&mut self.exposed)
    }

    pub fn flush(&self) {
        unsafe {
            xlib::XFlush(self.display);
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}

impl Drop for WindowX11 {
    fn drop(&mut self) {
        unsafe {
            if !self.display.is_null() {
                xlib::XDestroyWindow(self.display, self.window);
                xlib::XCloseDisplay(self.display);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_button_tracks_press_and_release() {
        let mut window = WindowX11::new();

        let press = window.primary_button(PRIMARY_BUTTON, 10, 700, true).unwrap();
        assert!(press.pressed && !press.released);
        assert_eq!(press.button, 1);
        assert!(window.primary_down);

        let release = window.primary_button(PRIMARY_BUTTON, 10, 500, false).unwrap();
        assert!(release.released && !release.pressed);
        assert_eq!(release.y, 500.0);
        assert!(!window.primary_down);
    }

    #[test]
    fn test_damage_reported_once() {
        let mut window = WindowX11::new();
        assert!(window.take_damaged());
        assert!(!window.take_damaged());
    }

    #[test]
    fn test_other_buttons_dropped() {
        let mut window = WindowX11::new();
        for button in [xlib::Button2, xlib::Button3, xlib::Button4, xlib::Button5] {
            assert!(window.primary_button(button, 0, 0, true).is_none());
        }
        assert!(!window.primary_down);
    }
}
