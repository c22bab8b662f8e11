use super::*;

impl App {
    /// Only the visible dashboard polls, and only while not paused.
    pub(super) fn sync_polling(&mut self, now: Instant) {
        let interval = self.config.poll_interval();
        let active = (!self.paused).then_some(self.mode);
        for (mode, running) in [
            (UiMode::Services, self.services_poll.is_running()),
            (UiMode::Carousel, self.carousel_poll.is_running()),
            (UiMode::System, self.system_poll.is_running()),
        ] {
            let want = active == Some(mode);
            if want == running {
                continue;
            }
            match (mode, want) {
                (UiMode::Services, true) => self.services_poll.start(interval, now),
                (UiMode::Services, false) => self.services_poll.stop(),
                (UiMode::Carousel, true) => self.carousel_poll.start(interval, now),
                (UiMode::Carousel, false) => self.carousel_poll.stop(),
                (UiMode::System, true) => self.system_poll.start(interval, now),
                (UiMode::System, false) => self.system_poll.stop(),
                _ => {}
            }
            tracing::debug!(panel = mode.name(), polling = want, "panel polling changed");
        }
    }

    /// Harvest finished polls and hand them to their panels.
    pub(super) fn tick_panels(&mut self, now: Instant) {
        match self.services_poll.tick(now) {
            Some(Ok(report)) => {
                self.services.grid.on_report(&report);
                let count = self.services.entry_count();
                self.services.selected = self.services.selected.min(count.saturating_sub(1));
            }
            Some(Err(err)) => self.services.grid.on_failure(&err),
            None => {}
        }
        match self.carousel_poll.tick(now) {
            Some(Ok(report)) => self.carousel.apply(report),
            Some(Err(err)) => self.carousel.streams.on_failure(&err),
            None => {}
        }
        match self.system_poll.tick(now) {
            Some(Ok(report)) => {
                self.system.report = Some(report);
                self.system.error = None;
            }
            Some(Err(err)) => self.system.error = Some(err.to_string()),
            None => {}
        }
    }

    /// Refresh the visible view right away.
    pub(super) fn refresh_now(&mut self) {
        let now = Instant::now();
        let issued = match self.mode {
            UiMode::Services => self.services_poll.trigger_now(now),
            UiMode::Carousel => self.carousel_poll.trigger_now(now),
            UiMode::System => self.system_poll.trigger_now(now),
            UiMode::Chunks => {
                self.refresh_chunk_list();
                true
            }
            UiMode::Schemes => {
                self.refresh_scheme_list();
                true
            }
        };
        if !issued {
            self.push_output(vec![format!("{}: refresh already in flight", self.mode.name())]);
        }
    }

    pub(super) fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        self.sync_polling(Instant::now());
        let msg = if paused { "polling paused" } else { "polling resumed" };
        self.push_output(vec![msg.to_string()]);
    }

    /// The backend no longer honours this session: drop everything tied to it
    /// and reload what is on screen.
    pub(super) fn reset_session(&mut self, err: ConsoleError) {
        tracing::warn!(error = %err, "session-bearing request failed; resetting console session");
        self.services.detail = None;
        self.chunks.wizard.reset();
        self.schemes.wizard.reset();
        self.schemes.activation.clear();
        self.modal = None;

        let now = Instant::now();
        self.services_poll.trigger_now(now);
        self.carousel_poll.trigger_now(now);
        self.system_poll.trigger_now(now);
        match self.mode {
            UiMode::Chunks => self.refresh_chunk_list(),
            UiMode::Schemes => self.refresh_scheme_list(),
            _ => {}
        }
        self.push_error(format!("{}; session reset", err));
    }
}
