// File: crates/figure-preview/src/lib.rs
// Summary: Shows an RGBA image in a window until it is closed (winit + softbuffer).

use std::num::NonZeroU32;

use anyhow::{anyhow, Context, Result};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::WindowBuilder;

/// Tightly packed RGBA8 pixels.
pub struct Rgba {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Rgba {
    /// Accepts the `(pixels, width, height, stride)` tuple the renderers return.
    pub fn from_rendered((pixels, width, height, stride): (Vec<u8>, i32, i32, usize)) -> Result<Self> {
        let (w, h) = (u32::try_from(width)?, u32::try_from(height)?);
        if stride != w as usize * 4 || pixels.len() != stride * h as usize {
            return Err(anyhow!("unexpected buffer layout {width}x{height} stride {stride} len {}", pixels.len()));
        }
        Ok(Self { pixels, width: w, height: h })
    }

    /// Pack one pixel as 0RGB for softbuffer.
    #[inline]
    fn xrgb(&self, x: u32, y: u32) -> u32 {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let (r, g, b) = (self.pixels[i] as u32, self.pixels[i + 1] as u32, self.pixels[i + 2] as u32);
        (r << 16) | (g << 8) | b
    }

    /// Fill a `w x h` frame, nearest-neighbour scaled to fit with letterboxing.
    fn blit(&self, frame: &mut [u32], w: u32, h: u32, backdrop: u32) {
        let scale = (w as f32 / self.width as f32).min(h as f32 / self.height as f32);
        let (dw, dh) = ((self.width as f32 * scale) as u32, (self.height as f32 * scale) as u32);
        let (ox, oy) = ((w - dw.min(w)) / 2, (h - dh.min(h)) / 2);
        for y in 0..h {
            for x in 0..w {
                let inside = x >= ox && x < ox + dw && y >= oy && y < oy + dh;
                frame[(y * w + x) as usize] = if inside {
                    let sx = (((x - ox) as f32 / scale) as u32).min(self.width - 1);
                    let sy = (((y - oy) as f32 / scale) as u32).min(self.height - 1);
                    self.xrgb(sx, sy)
                } else {
                    backdrop
                };
            }
        }
    }
}

/// Whether a window system is reachable. On Linux and the BSDs this needs an X11
/// or Wayland display; other platforms always have one.
pub fn display_available() -> bool {
    if cfg!(any(target_os = "linux", target_os = "freebsd", target_os = "dragonfly", target_os = "netbsd", target_os = "openbsd")) {
        std::env::var_os("DISPLAY").is_some() || std::env::var_os("WAYLAND_DISPLAY").is_some()
    } else {
        true
    }
}

/// Open a window showing `image` and block until it is closed (or Escape/Q is pressed).
pub fn show(title: &str, image: &Rgba) -> Result<()> {
    if !display_available() {
        return Err(anyhow!("no display available"));
    }
    let mut event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(title)
        .with_inner_size(PhysicalSize::new(image.width, image.height))
        .build(&event_loop)
        .context("building preview window")?;

    let context = unsafe { softbuffer::Context::new(&window) }.map_err(|e| anyhow!("softbuffer context: {e}"))?;
    let mut surface =
        unsafe { softbuffer::Surface::new(&context, &window) }.map_err(|e| anyhow!("softbuffer surface: {e}"))?;

    let mut size = window.inner_size();
    let mut failure: Option<anyhow::Error> = None;
    tracing::debug!(width = image.width, height = image.height, "preview window open");

    event_loop.run_return(|event, _, cf| {
        *cf = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *cf = ControlFlow::Exit,
                WindowEvent::KeyboardInput {
                    input: KeyboardInput { state: ElementState::Pressed, virtual_keycode: Some(key), .. },
                    ..
                } if matches!(key, VirtualKeyCode::Escape | VirtualKeyCode::Q) => *cf = ControlFlow::Exit,
                WindowEvent::Resized(new_size) => {
                    size = new_size;
                    window.request_redraw();
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
                    return;
                };
                let drawn = surface
                    .resize(w, h)
                    .and_then(|_| surface.buffer_mut())
                    .and_then(|mut frame| {
                        image.blit(&mut frame, w.get(), h.get(), 0x00_f0_f0_f0);
                        frame.present()
                    });
                if let Err(e) = drawn {
                    failure = Some(anyhow!("presenting frame: {e}"));
                    *cf = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    });

    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
