//! Presentation binder for roster.
//!
//! This crate is the presentation side of the roster boundary. A
//! [`Binder`] owns all interaction with the display surface: it captures the
//! query the user typed, hands the data layer a render callback for the
//! duration of one call, and renders whatever comes back. It never performs
//! the network call itself, and the data layer never touches the surface
//! except through the callback the binder supplies.
//!
//! The host UI framework is abstracted to the [`Surface`] trait - the three
//! capabilities this pattern needs from its host are reading the input
//! value, appending display items, and delivering the submission trigger.
//! The first two are `Surface` methods; the trigger is the host calling
//! [`Binder::submit`].

use roster_client::{Directory, FetchError};
use roster_types::{Query, ResultSet};

/// Capability the surrounding display framework must provide.
///
/// Stands in for a form input and a result list. Implementations own
/// whatever the items actually become - printed lines, list widget rows,
/// DOM nodes.
pub trait Surface {
    /// Current value of the query input.
    fn input_value(&self) -> String;

    /// Append one display item to the end of the result list.
    fn append_item(&mut self, text: &str);
}

/// Owns the display surface and the render callback.
///
/// A `Binder` owns its surface outright; the [`Directory`] is passed in per
/// submission, so neither side holds an ambient reference to the other.
pub struct Binder<S: Surface> {
    surface: S,
}

impl<S: Surface> Binder<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Reads current form state. No validation: the query goes to the data
    /// layer exactly as typed.
    pub fn capture_input(&self) -> Query {
        Query::new(self.surface.input_value())
    }

    /// Appends one display item per record, in response order.
    ///
    /// Purely additive: prior items are never cleared, so repeated
    /// submissions accumulate. That reproduces the behavior this module
    /// demonstrates; a production UI would clear the list first.
    pub fn render(&mut self, results: &ResultSet) {
        for record in results {
            self.surface.append_item(&record.name);
        }
    }

    /// Diagnostic output only. There is no user-facing error UI, no retry,
    /// and nothing is rendered on failure.
    pub fn report_error(err: &FetchError) {
        tracing::warn!(%err, "fetch failed; nothing rendered");
    }

    /// The submission trigger: capture input, fetch, render.
    ///
    /// The render callback handed to the directory borrows the surface for
    /// the duration of this one call; exactly one of render / report-error
    /// happens per submission.
    pub async fn submit(&mut self, directory: &Directory) {
        let query = self.capture_input();
        directory
            .fetch_with(
                &query,
                |results| self.render(&results),
                |err| Self::report_error(&err),
            )
            .await;
    }
}
