//! Event names read line by line from a command stream

use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

use log::{debug, warn};
use smith_core::{Event, ParseEventError, Signal};
use smith_engine::EventPoster;

use crate::StopHandle;

/// Parse one command line: an event name or its decimal signal number.
/// Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Option<Result<Event, ParseEventError>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    match line.parse::<u16>() {
        Ok(raw) => Some(Event::from_signal(Signal::new(raw)).ok_or(ParseEventError)),
        Err(_) => Some(line.parse()),
    }
}

/// Post every event named in `reader` until end of input.
/// Returns the number of events queued.
pub fn forward_events<R: BufRead>(reader: R, poster: &EventPoster) -> io::Result<usize> {
    let mut queued = 0;
    for line in reader.lines() {
        let line = line?;
        match parse_command(&line) {
            None => {}
            Some(Ok(event)) => match poster.post(event) {
                Ok(()) => {
                    debug!("queued {} ({})", event, event.signal());
                    queued += 1;
                }
                Err(e) => warn!("{}", e),
            },
            Some(Err(e)) => warn!("'{}': {}", line.trim(), e),
        }
    }
    Ok(queued)
}

/// Forward events from `reader` on a new thread, stopping `stop` when the
/// input ends.
pub fn spawn_reader<R>(reader: R, poster: EventPoster, stop: StopHandle) -> JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        match forward_events(reader, &poster) {
            Ok(queued) => debug!("command input closed after {} events", queued),
            Err(e) => warn!("command input failed: {}", e),
        }
        stop.stop();
    })
}
