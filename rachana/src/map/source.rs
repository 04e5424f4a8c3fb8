//! Map sources: where raw map descriptions come from.

use crate::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Provider of named raw map descriptions
pub trait MapSource {
    /// Names of every map this source can load
    fn available_maps(&self) -> BTreeSet<String>;

    /// Raw YAML text of a map
    fn load_map_description(&self, name: &str) -> Result<String>;

    /// Fail with [`Error::UnknownMap`] unless `name` is available
    fn ensure_available(&self, name: &str) -> Result<()> {
        let available = self.available_maps();
        if available.contains(name) {
            Ok(())
        } else {
            Err(Error::UnknownMap {
                name: name.to_string(),
                available,
            })
        }
    }
}

impl<T: MapSource + ?Sized> MapSource for Box<T> {
    fn available_maps(&self) -> BTreeSet<String> {
        (**self).available_maps()
    }

    fn load_map_description(&self, name: &str) -> Result<String> {
        (**self).load_map_description(name)
    }
}

/// Maps compiled into the binary
#[derive(Debug, Clone)]
pub struct BuiltinMaps {
    maps: BTreeMap<&'static str, &'static str>,
}

impl BuiltinMaps {
    pub fn new() -> Self {
        let maps = BTreeMap::from([
            ("4way", include_str!("../../maps/4way.yaml")),
            ("loop_empty", include_str!("../../maps/loop_empty.yaml")),
            ("straight_road", include_str!("../../maps/straight_road.yaml")),
        ]);
        Self { maps }
    }
}

impl Default for BuiltinMaps {
    fn default() -> Self {
        Self::new()
    }
}

impl MapSource for BuiltinMaps {
    fn available_maps(&self) -> BTreeSet<String> {
        self.maps.keys().map(|k| k.to_string()).collect()
    }

    fn load_map_description(&self, name: &str) -> Result<String> {
        self.maps
            .get(name)
            .map(|text| text.to_string())
            .ok_or_else(|| Error::UnknownMap {
                name: name.to_string(),
                available: self.available_maps(),
            })
    }
}

/// Maps stored as `<name>.yaml` files in one directory
#[derive(Debug, Clone)]
pub struct DirectoryMapSource {
    root: PathBuf,
}

impl DirectoryMapSource {
    /// Use `root` as the map directory. Fails if it is not a directory.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(Error::Config(format!(
                "maps directory {} does not exist",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.yaml", name))
    }
}

impl MapSource for DirectoryMapSource {
    fn available_maps(&self) -> BTreeSet<String> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Cannot list maps in {}: {}", self.root.display(), e);
                return BTreeSet::new();
            }
        };

        entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "yaml"))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(String::from))
            .collect()
    }

    fn load_map_description(&self, name: &str) -> Result<String> {
        self.ensure_available(name)?;
        Ok(fs::read_to_string(self.path_for(name))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::TileMap;

    #[test]
    fn test_builtin_maps_parse() {
        let source = BuiltinMaps::new();
        let names = source.available_maps();
        assert!(names.contains("4way"));
        for name in &names {
            let text = source.load_map_description(name).unwrap();
            TileMap::from_yaml(&text).unwrap();
        }
    }

    #[test]
    fn test_builtin_unknown_map() {
        let source = BuiltinMaps::new();
        let err = source.load_map_description("udem1").unwrap_err();
        match err {
            Error::UnknownMap { name, available } => {
                assert_eq!(name, "udem1");
                assert!(available.contains("4way"));
            }
            other => panic!("Expected UnknownMap, got {other:?}"),
        }
    }

    #[test]
    fn test_directory_source() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("corridor.yaml"), "tiles:\n- [straight/E]\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a map").unwrap();

        let source = DirectoryMapSource::new(dir.path()).unwrap();
        let names = source.available_maps();
        assert_eq!(names.len(), 1);
        assert!(names.contains("corridor"));

        let text = source.load_map_description("corridor").unwrap();
        assert!(text.contains("straight/E"));

        assert!(matches!(
            source.ensure_available("notes"),
            Err(Error::UnknownMap { .. })
        ));
    }

    #[test]
    fn test_directory_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            DirectoryMapSource::new(missing),
            Err(Error::Config(_))
        ));
    }
}
