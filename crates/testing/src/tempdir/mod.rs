// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use std::{
	env, fs,
	path::{Path, PathBuf},
};

use uuid::Uuid;

/// Runs `f` inside a fresh directory that is removed afterwards.
pub fn temp_dir<F, E>(f: F) -> Result<(), E>
where
	F: FnOnce(&Path) -> Result<(), E>,
	E: From<std::io::Error>,
{
	let path = unique_path();

	fs::create_dir(&path)?;
	let result = f(&path);

	let _ = fs::remove_dir_all(&path);
	result
}

fn unique_path() -> PathBuf {
	let mut path = env::temp_dir();
	path.push(format!("geocloud-{}", Uuid::new_v4()));
	path
}
