// ============================================================================
// WINDOWED HOST
// ============================================================================

use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use pixels::{Pixels, SurfaceTexture};
use tracing::{debug, error, info};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

use crate::config::{SpeedViewConfig, WindowConfig};
use crate::error::Result;
use crate::geometry::Size;
use crate::measure::MeasureSpec;
use crate::raster::{FontMetrics, PixelCanvas};
use crate::slider::{Slider, SliderInput};
use crate::speed_view::SpeedView;

/// Command enum for driving the gauge from another thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedCommand {
    SetProgress(i32),
}

/// A speedometer in its own window, driven by the keyboard, the mouse wheel
/// or a command channel.
pub struct SpeedometerApp {
    view: SpeedView,
    window_config: WindowConfig,
    font: FontMetrics,
}

impl SpeedometerApp {
    pub fn new(config: SpeedViewConfig, window_config: WindowConfig, font: FontMetrics) -> Self {
        Self {
            view: SpeedView::new(config),
            window_config,
            font,
        }
    }

    pub fn show(self) -> Result<()> {
        self.run_window(None)
    }

    pub fn show_with_commands(self, receiver: Receiver<SpeedCommand>) -> Result<()> {
        self.run_window(Some(receiver))
    }

    fn run_window(self, receiver: Option<Receiver<SpeedCommand>>) -> Result<()> {
        let SpeedometerApp {
            mut view,
            window_config,
            font,
        } = self;

        let measured = view.on_measure(
            &font,
            MeasureSpec::AtMost(window_config.max_width),
            MeasureSpec::AtMost(window_config.max_height),
            Size::default(),
        );
        info!(width = measured.width, height = measured.height, "opening speedometer window");

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&window_config.title)
            .with_inner_size(LogicalSize::new(
                measured.width as f64,
                measured.height as f64,
            ))
            .with_resizable(window_config.resizable)
            .build(&event_loop)?;
        let window = Arc::new(window);

        let redraw_target = window.clone();
        view.set_invalidator(move || redraw_target.request_redraw());

        let size = window.inner_size();
        let mut fb_width = size.width as usize;
        let mut fb_height = size.height as usize;
        view.on_size_changed(size.width as i32, size.height as i32);
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

        let mut slider = Slider::new(view.progress());
        let mut receiver = receiver;
        let poll_interval = Duration::from_secs_f64(1.0 / window_config.max_framerate.max(1.0));
        let window_clone = window.clone();

        event_loop.run(move |event, window_target| {
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        info!("speedometer window closed");
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        if new_size.width == 0 || new_size.height == 0 {
                            return;
                        }
                        fb_width = new_size.width as usize;
                        fb_height = new_size.height as usize;
                        if let Err(err) = pixels
                            .resize_buffer(new_size.width, new_size.height)
                            .and_then(|_| pixels.resize_surface(new_size.width, new_size.height))
                        {
                            error!(%err, "failed to resize pixel surface");
                            window_target.exit();
                            return;
                        }
                        view.on_size_changed(new_size.width as i32, new_size.height as i32);
                        window_clone.request_redraw();
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        if event.state != ElementState::Pressed {
                            return;
                        }
                        if let Some(input) = slider_input_for_key(&event.logical_key) {
                            if let Some(value) = slider.apply(input) {
                                view.set_progress(value);
                            }
                        }
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        let lines = match delta {
                            MouseScrollDelta::LineDelta(_, y) => y.round() as i32,
                            MouseScrollDelta::PixelDelta(pos) => (pos.y / 20.0).round() as i32,
                        };
                        if lines != 0 {
                            if let Some(value) = slider.apply(SliderInput::Step(lines)) {
                                view.set_progress(value);
                            }
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        let frame = pixels.frame_mut();
                        let mut canvas =
                            PixelCanvas::new(frame, fb_width, fb_height).with_font(&font);
                        canvas.clear(window_config.background_color);
                        view.render(&mut canvas);
                        if let Err(err) = pixels.render() {
                            error!(%err, "failed to present frame");
                            window_target.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if let Some(rx) = receiver.as_ref() {
                        if drain_commands(rx, &mut view, &mut slider) {
                            debug!("command channel closed");
                            receiver = None;
                        }
                    }
                    if receiver.is_some() {
                        window_target
                            .set_control_flow(ControlFlow::WaitUntil(Instant::now() + poll_interval));
                    } else {
                        window_target.set_control_flow(ControlFlow::Wait);
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}

/// Applies every pending command; returns `true` once the sender is gone.
fn drain_commands(rx: &Receiver<SpeedCommand>, view: &mut SpeedView, slider: &mut Slider) -> bool {
    loop {
        match rx.try_recv() {
            Ok(SpeedCommand::SetProgress(value)) => {
                slider.set(value);
                view.set_progress(value);
            }
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => return true,
        }
    }
}

fn slider_input_for_key(key: &Key) -> Option<SliderInput> {
    match key {
        Key::Named(NamedKey::ArrowUp | NamedKey::ArrowRight) => Some(SliderInput::Step(1)),
        Key::Named(NamedKey::ArrowDown | NamedKey::ArrowLeft) => Some(SliderInput::Step(-1)),
        Key::Named(NamedKey::PageUp) => Some(SliderInput::Step(10)),
        Key::Named(NamedKey::PageDown) => Some(SliderInput::Step(-10)),
        Key::Named(NamedKey::Home) => Some(SliderInput::Min),
        Key::Named(NamedKey::End) => Some(SliderInput::Max),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::mpsc;

    #[test]
    fn keys_map_to_slider_moves() {
        assert_eq!(
            slider_input_for_key(&Key::Named(NamedKey::ArrowUp)),
            Some(SliderInput::Step(1))
        );
        assert_eq!(
            slider_input_for_key(&Key::Named(NamedKey::PageDown)),
            Some(SliderInput::Step(-10))
        );
        assert_eq!(
            slider_input_for_key(&Key::Named(NamedKey::End)),
            Some(SliderInput::Max)
        );
        assert_eq!(slider_input_for_key(&Key::Named(NamedKey::Escape)), None);
    }

    #[test]
    fn commands_pass_through_unclamped() {
        let redraws = Rc::new(Cell::new(0));
        let seen = redraws.clone();
        let mut view = SpeedView::new(SpeedViewConfig::default())
            .with_invalidator(move || seen.set(seen.get() + 1));
        let mut slider = Slider::new(0);
        let (tx, rx) = mpsc::channel();
        tx.send(SpeedCommand::SetProgress(30)).unwrap();
        tx.send(SpeedCommand::SetProgress(130)).unwrap();

        assert!(!drain_commands(&rx, &mut view, &mut slider));
        assert_eq!(view.progress(), 130);
        assert_eq!(slider.value(), 100);
        assert_eq!(redraws.get(), 2);

        drop(tx);
        assert!(drain_commands(&rx, &mut view, &mut slider));
    }
}
