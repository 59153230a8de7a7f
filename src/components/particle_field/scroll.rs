//! Debounced "page is scrolling" flag.
//!
//! Every scroll event raises the flag and restarts a quiet-period timer. The
//! timer is identified by the generation returned from [`ScrollDebounce::on_scroll`];
//! only the timer for the latest scroll may clear the flag, so a stale timer
//! that slips past cancellation is harmless.

/// Scroll flag plus the generation of the newest quiet-period timer.
#[derive(Clone, Debug, Default)]
pub struct ScrollDebounce {
	scrolling: bool,
	generation: u64,
}

impl ScrollDebounce {
	/// Whether a scroll arrived and its quiet period has not yet elapsed.
	pub fn is_scrolling(&self) -> bool {
		self.scrolling
	}

	/// Record a scroll event. Returns the generation the new timer must carry.
	pub fn on_scroll(&mut self) -> u64 {
		self.scrolling = true;
		self.generation = self.generation.wrapping_add(1);
		self.generation
	}

	/// Quiet period for `generation` elapsed.
	///
	/// Returns `true` only when this call lowered the flag.
	pub fn expire(&mut self, generation: u64) -> bool {
		if self.scrolling && generation == self.generation {
			self.scrolling = false;
			true
		} else {
			false
		}
	}

	/// Drop the flag and invalidate any outstanding timer.
	pub fn reset(&mut self) {
		self.scrolling = false;
		self.generation = self.generation.wrapping_add(1);
	}
}
