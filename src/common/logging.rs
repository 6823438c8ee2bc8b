// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Tracing setup shared by the host process and the test suites.
//!
//! The hot-path kernels never log; this exists so decoder fixtures, config
//! loading, and the embedding engine emit through one subscriber. Lines use
//! a glog-style layout so they interleave cleanly with engine logs:
//! `Lyyyymmdd hh:mm:ss.uuuuuu threadid file:line] message`.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};

use chrono::Local;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::{self as tracing_fmt, MakeWriter};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

use crate::common::config::RowKernelConfig;

static INIT: OnceLock<()> = OnceLock::new();

struct GlogFormatter;

impl<S, N> FormatEvent<S, N> for GlogFormatter
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        let level_char = match *metadata.level() {
            tracing::Level::ERROR => 'E',
            tracing::Level::WARN => 'W',
            tracing::Level::INFO => 'I',
            tracing::Level::DEBUG => 'D',
            tracing::Level::TRACE => 'T',
        };

        let thread_id = format!("{:?}", std::thread::current().id())
            .trim_start_matches("ThreadId(")
            .trim_end_matches(')')
            .parse::<u64>()
            .unwrap_or(0);

        write!(
            writer,
            "{}{} {} {}:{}] ",
            level_char,
            Local::now().format("%Y%m%d %H:%M:%S%.6f"),
            thread_id,
            metadata.file().unwrap_or("unknown"),
            metadata.line().unwrap_or(0),
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

#[derive(Clone)]
struct LockedFileWriter {
    file: Arc<Mutex<std::fs::File>>,
}

impl io::Write for LockedFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        io::Write::write(&mut *file, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        io::Write::flush(&mut *file)
    }
}

impl<'a> MakeWriter<'a> for LockedFileWriter {
    type Writer = LockedFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn log_file_path() -> PathBuf {
    if let Ok(path) = std::env::var("ROWKERNEL_LOG_FILE")
        && !path.trim().is_empty()
    {
        return PathBuf::from(path.trim());
    }
    let dir = std::env::var("ROWKERNEL_LOG_DIR")
        .ok()
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| "log".to_string());
    PathBuf::from(dir).join("rowkernel.log")
}

fn open_log_writer() -> Option<LockedFileWriter> {
    // Only write to a file when the caller asked for one; a library crate
    // defaults to stderr.
    if std::env::var("ROWKERNEL_LOG_FILE").is_err() && std::env::var("ROWKERNEL_LOG_DIR").is_err()
    {
        return None;
    }
    let path = log_file_path();
    if let Some(parent) = path.parent()
        && let Err(err) = fs::create_dir_all(parent)
    {
        eprintln!(
            "failed to create log directory {}: {}, fallback to stderr",
            parent.display(),
            err
        );
        return None;
    }
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => Some(LockedFileWriter {
            file: Arc::new(Mutex::new(file)),
        }),
        Err(err) => {
            eprintln!(
                "failed to open log file {}: {}, fallback to stderr",
                path.display(),
                err
            );
            None
        }
    }
}

/// Installs the subscriber once. `filter` is a full `EnvFilter` expression;
/// a bare level like "info" works too.
pub fn init_with_filter(filter: &str) {
    let filter = filter.to_string();
    INIT.get_or_init(move || {
        let env_filter = EnvFilter::new(filter);
        if let Some(make_writer) = open_log_writer() {
            let _ = tracing_fmt::fmt()
                .with_env_filter(env_filter)
                .with_writer(make_writer)
                .with_ansi(false)
                .event_format(GlogFormatter)
                .try_init();
            return;
        }
        // ANSI only when stderr is an actual terminal; redirected output
        // would show the escape codes as garbage.
        let _ = tracing_fmt::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
            .event_format(GlogFormatter)
            .try_init();
    });
}

/// Wires the loaded config into the subscriber: `log_filter` wins over
/// `log_level` when both are set.
pub fn init_from_config(config: &RowKernelConfig) {
    match config.log_filter.as_deref() {
        Some(filter) if !filter.trim().is_empty() => init_with_filter(filter),
        _ => init_with_filter(&config.log_level),
    }
}

pub fn init() {
    init_with_filter("info");
}

pub use tracing::{debug, error, info, trace, warn};
