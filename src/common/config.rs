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

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static CONFIG: OnceLock<RowKernelConfig> = OnceLock::new();

fn default_log_level() -> String {
    "info".to_string()
}

/// Process-wide config, loaded once. The kernels themselves are
/// configuration-free; this only carries observability knobs for the host
/// process embedding them.
#[derive(Clone, Debug, Deserialize)]
pub struct RowKernelConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Optional full tracing EnvFilter expression; takes precedence over
    /// `log_level` when set. Example: "rowkernel=debug".
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl Default for RowKernelConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_filter: None,
        }
    }
}

impl RowKernelConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config file: {}", path.display()))?;
        let cfg: RowKernelConfig =
            toml::from_str(&s).with_context(|| format!("parse toml: {}", path.display()))?;
        Ok(cfg)
    }
}

pub fn init_from_path(path: impl AsRef<Path>) -> Result<&'static RowKernelConfig> {
    if let Some(cfg) = CONFIG.get() {
        return Ok(cfg);
    }
    let cfg = RowKernelConfig::load_from_file(path.as_ref())?;
    let _ = CONFIG.set(cfg);
    Ok(CONFIG.get().expect("CONFIG set"))
}

/// Loads from `$ROWKERNEL_CONFIG`, then `./rowkernel.toml`, then built-in
/// defaults when neither exists.
pub fn init_from_env_or_default() -> Result<&'static RowKernelConfig> {
    if let Some(cfg) = CONFIG.get() {
        return Ok(cfg);
    }
    let cfg = match config_path_from_env() {
        Some(path) => RowKernelConfig::load_from_file(&path)?,
        None => RowKernelConfig::default(),
    };
    let _ = CONFIG.set(cfg);
    Ok(CONFIG.get().expect("CONFIG set"))
}

pub fn config() -> Result<&'static RowKernelConfig> {
    init_from_env_or_default()
}

fn config_path_from_env() -> Option<PathBuf> {
    if let Ok(p) = std::env::var("ROWKERNEL_CONFIG")
        && !p.trim().is_empty()
    {
        return Some(PathBuf::from(p));
    }
    let local = PathBuf::from("rowkernel.toml");
    local.exists().then_some(local)
}
