use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::backend::Backend;
use crate::renderer::SkyRenderer;

/// Shared stop flag for a [`FrameLoop`].
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Owner of a loop's lifetime: the loop stops when the guard is dropped.
#[derive(Debug)]
pub struct LoopGuard(CancelToken);

impl LoopGuard {
    pub fn new(token: CancelToken) -> Self {
        Self(token)
    }

    pub fn cancel(&self) {
        self.0.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.is_cancelled()
    }
}

impl Drop for LoopGuard {
    fn drop(&mut self) {
        if !self.0.is_cancelled() {
            log::info!("sky handle dropped; stopping render loop");
            self.0.cancel();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// A frame was rendered; schedule the next one.
    Continue,
    /// The loop was cancelled; nothing was rendered.
    Stop,
}

/// One render per tick, with cancellation checked before any work.
///
/// The driver owns the waiting: it calls [`FrameLoop::tick`] on every
/// display refresh and stops scheduling once it sees [`Tick::Stop`].
pub struct FrameLoop<B: Backend> {
    renderer: Rc<RefCell<SkyRenderer<B>>>,
    token: CancelToken,
}

impl<B: Backend> FrameLoop<B> {
    pub fn new(renderer: Rc<RefCell<SkyRenderer<B>>>, token: CancelToken) -> Self {
        Self { renderer, token }
    }

    pub fn tick(&self) -> Tick {
        if self.token.is_cancelled() {
            return Tick::Stop;
        }
        self.renderer.borrow_mut().frame();
        Tick::Continue
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::responsive::Layout;
    use crate::uniforms::{Uniform, UniformValue};

    #[derive(Default)]
    struct Counter {
        draws: usize,
    }

    impl Backend for Counter {
        fn set_uniform(&mut self, _: Uniform, _: UniformValue) {}
        fn resize(&mut self, _: u32, _: u32) {}
        fn draw(&mut self) {
            self.draws += 1;
        }
    }

    fn shared() -> Rc<RefCell<SkyRenderer<Counter>>> {
        Rc::new(RefCell::new(SkyRenderer::new(
            Counter::default(),
            RenderConfig::default(),
            Layout::fullscreen(640.0, 480.0),
        )))
    }

    #[test]
    fn renders_until_cancelled() {
        let renderer = shared();
        let token = CancelToken::new();
        let frames = FrameLoop::new(renderer.clone(), token.clone());

        let mut ticks = 0;
        while frames.tick() == Tick::Continue {
            ticks += 1;
            if ticks == 5 {
                token.cancel();
            }
        }
        assert_eq!(ticks, 5);
        assert_eq!(renderer.borrow().backend().draws, 5);
        assert_eq!(renderer.borrow().clock().frames(), 5);
    }

    #[test]
    fn cancelled_loop_renders_nothing() {
        let renderer = shared();
        let token = CancelToken::new();
        token.cancel();
        let frames = FrameLoop::new(renderer.clone(), token);
        assert_eq!(frames.tick(), Tick::Stop);
        assert_eq!(frames.tick(), Tick::Stop);
        assert_eq!(renderer.borrow().backend().draws, 0);
    }

    #[test]
    fn token_clones_share_state() {
        let a = CancelToken::new();
        let b = a.clone();
        assert!(!b.is_cancelled());
        a.cancel();
        assert!(b.is_cancelled());
    }

    #[test]
    fn dropping_the_guard_stops_the_loop() {
        let renderer = shared();
        let token = CancelToken::new();
        let frames = FrameLoop::new(renderer.clone(), token.clone());
        let guard = LoopGuard::new(token);

        assert_eq!(frames.tick(), Tick::Continue);
        assert!(!guard.is_cancelled());
        drop(guard);
        assert_eq!(frames.tick(), Tick::Stop);
        assert_eq!(renderer.borrow().backend().draws, 1);
    }

    #[test]
    fn explicit_cancel_then_drop_is_fine() {
        let token = CancelToken::new();
        let guard = LoopGuard::new(token.clone());
        guard.cancel();
        assert!(token.is_cancelled());
        drop(guard);
        assert!(token.is_cancelled());
    }
}
