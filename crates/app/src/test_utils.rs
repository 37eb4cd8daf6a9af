//! Test helpers
//!
//! In-memory transport and delay which record everything into a shared [`Journal`].

use std::{cell::RefCell, rc::Rc, time::Duration};

use milight_core::{proto::Command, time::Delay, Error};
use milight_network::Transport;

use crate::{CancelToken, MilightResult};

/// Recorded transport or delay event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Send(Command),
    Delay(Duration),
}

/// Shared log of the sent commands and pauses in their order.
#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Event>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport writing into this journal.
    pub fn transport(&self) -> JournalTransport {
        JournalTransport {
            journal: self.clone(),
            fail_after: None,
        }
    }

    /// Creates a delay writing into this journal instead of sleeping.
    pub fn delay(&self) -> JournalDelay {
        JournalDelay {
            journal: self.clone(),
            cancel_after: None,
        }
    }

    /// Returns all recorded events.
    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    /// Returns only the sent commands.
    pub fn commands(&self) -> Vec<Command> {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Send(command) => Some(*command),
                Event::Delay(_) => None,
            })
            .collect()
    }

    /// Returns only the pauses.
    pub fn delays(&self) -> Vec<Duration> {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Delay(duration) => Some(*duration),
                Event::Send(_) => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }
}

/// Transport which records commands into the [`Journal`].
#[derive(Debug)]
pub struct JournalTransport {
    journal: Journal,
    fail_after: Option<usize>,
}

impl JournalTransport {
    /// Makes every send after the given number of successful ones fail.
    #[must_use]
    pub fn fail_after(mut self, sends: usize) -> Self {
        self.fail_after = Some(sends);
        self
    }
}

impl Transport for JournalTransport {
    fn send(&mut self, command: Command) -> MilightResult<()> {
        if let Some(remaining) = self.fail_after.as_mut() {
            if *remaining == 0 {
                return Err(Error::transport("network is unreachable"));
            }
            *remaining -= 1;
        }

        self.journal.push(Event::Send(command));
        Ok(())
    }
}

/// Delay which records pauses into the [`Journal`] and returns immediately.
#[derive(Debug)]
pub struct JournalDelay {
    journal: Journal,
    cancel_after: Option<(usize, CancelToken)>,
}

impl JournalDelay {
    /// Cancels the token once the given number of pauses have been recorded.
    #[must_use]
    pub fn cancel_after(mut self, delays: usize, token: CancelToken) -> Self {
        self.cancel_after = Some((delays, token));
        self
    }
}

impl Delay for JournalDelay {
    fn delay(&mut self, duration: Duration) {
        self.journal.push(Event::Delay(duration));

        if let Some((remaining, token)) = self.cancel_after.as_mut() {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                token.cancel();
            }
        }
    }
}
