use std::path::{Path, PathBuf};

use chrono::prelude::*;
use slog::Logger;
use uuid::Uuid;

use super::{create_logger_with_kv_and_time, Config, Error};

const ACCESSID_LEN: usize = 8;

/// Root logger of one command run
///
/// Every record carries the `accessid` key. A start banner is logged on creation and an end
/// banner with the elapsed seconds when the logger is dropped.
#[derive(Debug)]
pub struct AppLogger {
    inner: Logger,
    accessid: String,
    accesstime: DateTime<Local>,
    filepath: Option<PathBuf>,
}

impl AppLogger {
    pub fn new<C: Into<Config>>(config: C) -> Result<Self, Error> {
        let accesstime = Local::now();
        let accessid = accessid_for(&accesstime);
        let (inner, filepath) = create_logger_with_kv_and_time(
            config,
            o!("accessid" => accessid.clone()),
            &accesstime,
        )?;
        let logger = AppLogger {
            inner: inner,
            accessid: accessid,
            accesstime: accesstime,
            filepath: filepath,
        };
        info!(
            logger.inner,
            "LOG Start with ACCESSID=[{}] ACCESSTIME=[{}]",
            logger.accessid,
            logger.accesstime.to_rfc3339(),
        );
        Ok(logger)
    }

    pub fn accessid(&self) -> &str {
        &self.accessid
    }

    pub fn accesstime(&self) -> &DateTime<Local> {
        &self.accesstime
    }

    pub fn filepath(&self) -> Option<&Path> {
        self.filepath.as_ref().map(|p| p.as_path())
    }

    /// A child logger for one part of the run.
    pub fn create(&self) -> Logger {
        self.inner.new(o!())
    }
}

impl Drop for AppLogger {
    fn drop(&mut self) {
        let elapsed = Local::now().signed_duration_since(self.accesstime);
        info!(
            self.inner,
            "LOG End with ACCESSID=[{}] PROCESSTIME=[{:.3}s]",
            self.accessid,
            elapsed.num_milliseconds() as f64 * 1e-3,
        );
    }
}

fn accessid_for(time: &DateTime<Local>) -> String {
    let mut id = Uuid::new_v5(&Uuid::NAMESPACE_OID, time.to_rfc3339().as_bytes()).to_string();
    id.truncate(ACCESSID_LEN);
    id
}
