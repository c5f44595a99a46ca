/// A short, self-contained animation run by an [`Animator`].
///
/// `C` is the caller-owned context the animation acts on (the object being
/// moved plus whatever state it needs). It is handed in on every tick rather
/// than captured, so the animator never aliases caller state.
pub trait Animation<C> {
    /// How long the animation runs, in seconds.
    fn duration(&self) -> f32;

    /// Advances the animation by `dt` seconds.
    fn tick(&mut self, dt: f32, ctx: &mut C);

    /// Label used in logs and diagnostics.
    fn name(&self) -> &str {
        "animation"
    }
}

/// Builds one animation instance when its turn comes.
pub type AnimationFactory<C> = Box<dyn FnMut(&mut C) -> Box<dyn Animation<C>>>;

/// Plays a fixed list of animations back to back.
///
/// Instances are created lazily by their factory at the moment they become
/// active, so each can read fresh parameters from the context. The animator
/// does not guard against restarts: callers poll [`finish`](Self::finish)
/// before starting the same action again.
pub struct Animator<C> {
    /// Seconds since `start`.
    current_time: f32,
    /// `current_time` at which the active animation hands over.
    next_transition: f32,
    factories: Vec<AnimationFactory<C>>,
    current_index: Option<usize>,
    current: Option<Box<dyn Animation<C>>>,
}

impl<C> Default for Animator<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for Animator<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animator")
            .field("current_time", &self.current_time)
            .field("next_transition", &self.next_transition)
            .field("factories", &self.factories.len())
            .field("current_index", &self.current_index)
            .field("current", &self.current.as_ref().map(|a| a.name()))
            .finish()
    }
}

impl<C> Animator<C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_time: 0.0,
            next_transition: 0.0,
            factories: Vec::new(),
            current_index: None,
            current: None,
        }
    }

    /// Appends an animation to the end of the sequence.
    pub fn add_animation<F>(&mut self, factory: F)
    where
        F: FnMut(&mut C) -> Box<dyn Animation<C>> + 'static,
    {
        self.factories.push(Box::new(factory));
    }

    /// Restarts the sequence from its first animation.
    ///
    /// Whatever was playing is dropped. With no animations the animator stays
    /// finished.
    pub fn start(&mut self, ctx: &mut C) {
        self.current = None;
        self.current_index = None;
        self.current_time = 0.0;
        self.next_transition = 0.0;

        if self.factories.is_empty() {
            log::trace!("Animator started with an empty sequence");
            return;
        }
        self.activate(0, ctx);
    }

    /// Advances the sequence by `dt` seconds.
    ///
    /// Does nothing when finished.
    pub fn tick(&mut self, dt: f32, ctx: &mut C) {
        let Some(current) = self.current.as_mut() else {
            return;
        };

        self.current_time += dt;
        current.tick(dt, ctx);

        if self.current_time >= self.next_transition {
            let next = self.current_index.map_or(0, |i| i + 1);
            // Release the finished instance before building its successor
            self.current = None;

            if next < self.factories.len() {
                self.activate(next, ctx);
            } else {
                log::trace!("Animator finished after {:.3}s", self.current_time);
                self.current_index = None;
            }
        }
    }

    /// True when no animation is active, including before the first `start`.
    #[must_use]
    pub fn finish(&self) -> bool {
        self.current.is_none()
    }

    /// Drops the active animation, leaving the animator finished.
    pub fn stop(&mut self) {
        self.current = None;
        self.current_index = None;
    }

    /// Number of animations in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Position of the active animation in the sequence.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Seconds since the last `start`.
    #[must_use]
    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    #[must_use]
    pub fn current(&self) -> Option<&dyn Animation<C>> {
        self.current.as_deref()
    }

    fn activate(&mut self, index: usize, ctx: &mut C) {
        let animation = (self.factories[index])(ctx);
        self.next_transition += animation.duration();
        log::trace!(
            "Animator: '{}' active at {:.3}s, hands over at {:.3}s",
            animation.name(),
            self.current_time,
            self.next_transition
        );
        self.current_index = Some(index);
        self.current = Some(animation);
    }
}
