// Copyright (c) 2023 Jean-Daniel Michaud
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::env;
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Config;

#[derive(Debug, PartialEq)]
pub enum ConfigProvenance {
  Default,
  XdgPath(PathBuf),
  CustomPath(PathBuf),
}

impl fmt::Display for ConfigProvenance {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigProvenance::Default => write!(f, "embedded default"),
      ConfigProvenance::XdgPath(path) | ConfigProvenance::CustomPath(path) => write!(f, "{}", path.display()),
    }
  }
}

pub struct ConfigAccess {
  pub config: Config,
  pub provenance: ConfigProvenance,
}

fn is_file_not_empty<P: AsRef<Path>>(path: P) -> bool {
  match std::fs::metadata(path) {
    Ok(metadata) => metadata.is_file() && metadata.len() > 0,
    Err(..) => false,
  }
}

// $XDG_CONFIG_HOME/<package>/config.yaml, falling back on $HOME/.config
fn user_config_path() -> Option<PathBuf> {
  let config_home = env::var_os("XDG_CONFIG_HOME")
    .map(PathBuf::from)
    .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
  Some(config_home.join(env!("CARGO_PKG_NAME")).join("config.yaml"))
}

fn locate(config_path: &Option<PathBuf>, user_path: Option<PathBuf>) -> ConfigProvenance {
  match (config_path, user_path) {
    (Some(path), _) => ConfigProvenance::CustomPath(path.clone()),
    (None, Some(path)) if is_file_not_empty(&path) => ConfigProvenance::XdgPath(path),
    _ => ConfigProvenance::Default,
  }
}

// Get the config file from the command line option --config
// Otherwise from the user configuration directory
// Otherwise use the default.
pub fn get_config(config_path: &Option<PathBuf>, default_config: &str) -> Result<ConfigAccess, Box<dyn Error>> {
  let provenance = locate(config_path, user_config_path());
  let content = match &provenance {
    ConfigProvenance::Default => default_config.to_string(),
    ConfigProvenance::XdgPath(path) | ConfigProvenance::CustomPath(path) => match std::fs::read_to_string(path) {
      Ok(content) => content,
      Err(e) => Err(format!("error: {e}: {}", path.display()))?,
    },
  };
  let config: Config = match serde_yaml::from_str(&content) {
    Ok(config) => config,
    Err(e) => Err(format!("error: invalid configuration ({provenance}): {e}"))?,
  };
  Ok(ConfigAccess { config, provenance })
}
