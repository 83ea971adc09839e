//! Deferred computations driven by an explicit loop.
//!
//! A [`Trampoline`] is either a finished value, a thunk producing the next
//! step, or a computation followed by a continuation. [`Trampoline::run`]
//! evaluates it with a heap-allocated continuation stack, so the native call
//! stack stays flat no matter how deeply parsers recurse into each other.
//!
//! Values travel between steps type-erased as `Box<dyn Any>`; the typed
//! wrapper guarantees every continuation receives the type it was built for.

use std::any::Any;
use std::marker::PhantomData;

type Continuation = Box<dyn FnOnce(Box<dyn Any>) -> Step>;

enum Step {
    Done(Box<dyn Any>),
    More(Box<dyn FnOnce() -> Step>),
    FlatMap(Box<Step>, Continuation),
}

/// A suspended computation producing a `T`
#[must_use = "a trampoline does nothing until it is run"]
pub struct Trampoline<T> {
    step: Step,
    _output: PhantomData<fn() -> T>,
}

impl<T: 'static> Trampoline<T> {
    fn from_step(step: Step) -> Self {
        Trampoline {
            step,
            _output: PhantomData,
        }
    }

    /// A computation that has already finished
    pub fn done(value: T) -> Self {
        Self::from_step(Step::Done(Box::new(value)))
    }

    /// A computation whose next step is produced by `thunk`
    pub fn more<F>(thunk: F) -> Self
    where
        F: FnOnce() -> Trampoline<T> + 'static,
    {
        Self::from_step(Step::More(Box::new(move || thunk().step)))
    }

    /// Feed the result of this computation into `f`, which decides how to continue
    pub fn flat_map<U, F>(self, f: F) -> Trampoline<U>
    where
        U: 'static,
        F: FnOnce(T) -> Trampoline<U> + 'static,
    {
        let continuation: Continuation = Box::new(move |value| f(unerase::<T>(value)).step);
        Trampoline::from_step(Step::FlatMap(Box::new(self.step), continuation))
    }

    /// Transform the eventual result of this computation
    pub fn map<U, F>(self, f: F) -> Trampoline<U>
    where
        U: 'static,
        F: FnOnce(T) -> U + 'static,
    {
        self.flat_map(move |value| Trampoline::done(f(value)))
    }

    /// Returns true if no further steps are needed
    pub fn is_done(&self) -> bool {
        matches!(self.step, Step::Done(_))
    }

    /// Drive the computation to completion
    pub fn run(self) -> T {
        let mut current = self.step;
        let mut pending: Vec<Continuation> = Vec::new();
        let mut steps: usize = 0;
        let mut deepest: usize = 0;

        loop {
            steps += 1;
            current = match current {
                Step::Done(value) => match pending.pop() {
                    Some(continuation) => continuation(value),
                    None => {
                        log::trace!(
                            "trampoline finished after {} steps, deepest continuation stack {}",
                            steps,
                            deepest
                        );
                        return unerase::<T>(value);
                    }
                },
                Step::More(thunk) => thunk(),
                Step::FlatMap(inner, continuation) => {
                    pending.push(continuation);
                    deepest = deepest.max(pending.len());
                    *inner
                }
            };
        }
    }
}

fn unerase<T: 'static>(value: Box<dyn Any>) -> T {
    match value.downcast::<T>() {
        Ok(value) => *value,
        Err(_) => unreachable!("trampoline continuation received a value of another type"),
    }
}
