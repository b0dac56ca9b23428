use std::io::{self, Read, Write};

use shrmpl_prefs::config::load_config;
use shrmpl_prefs::{Platform, PreferencesMap, PrefsError};
use tempfile::NamedTempFile;

const BOARDS: &str = "\
# Board definitions
uno.name = Arduino Uno
uno.upload.tool = avrdude
uno.upload.tool.windows = avrdude.exe
uno.upload.tool.macos = avrdude-mac

mega.name = Arduino Mega
mega.build.mcu = atmega2560
menu = cpu
this line is ignored
";

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

/// Yields some bytes, then fails.
struct FailingReader {
    sent: bool,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.sent {
            return Err(io::Error::new(io::ErrorKind::Other, "disk on fire"));
        }
        self.sent = true;
        let data = b"a=1\nb=";
        buf[..data.len()].copy_from_slice(data);
        Ok(data.len())
    }
}

#[test]
fn load_file_and_navigate() {
    let file = write_temp(BOARDS);
    let prefs = PreferencesMap::from_path(file.path(), Platform::Windows).unwrap();

    assert_eq!(prefs.get("uno.upload.tool"), Some("avrdude.exe"));
    assert_eq!(prefs.get("uno.upload.tool.macos"), Some("avrdude-mac"));
    assert!(!prefs.contains_key("this line is ignored"));

    assert_eq!(prefs.top_level_map(), PreferencesMap::from_iter([("menu", "cpu")]));

    let boards = prefs.first_level_map();
    assert_eq!(boards.keys().collect::<Vec<_>>(), vec!["uno", "mega"]);
    assert_eq!(boards["mega"].get("build.mcu"), Some("atmega2560"));

    let upload = prefs.sub_tree("uno").sub_tree("upload");
    assert_eq!(upload.get("tool"), Some("avrdude.exe"));
    assert_eq!(upload.get("tool.windows"), Some("avrdude.exe"));
}

#[test]
fn same_file_different_platforms() {
    let file = write_temp(BOARDS);
    let mac = PreferencesMap::from_path(file.path(), Platform::Macos).unwrap();
    let linux = PreferencesMap::from_path(file.path(), Platform::Linux).unwrap();

    assert_eq!(mac.get("uno.upload.tool"), Some("avrdude-mac"));
    assert_eq!(linux.get("uno.upload.tool"), Some("avrdude"));
}

#[test]
fn missing_file_is_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.txt");
    match PreferencesMap::from_path(&path, Platform::Linux) {
        Err(PrefsError::Open { path: p, source }) => {
            assert_eq!(p, path);
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        }
        other => panic!("expected open error, got {:?}", other),
    }
}

#[test]
fn read_failure_propagates() {
    let mut prefs = PreferencesMap::new();
    let err = prefs
        .load(FailingReader { sent: false }, Platform::Linux)
        .unwrap_err();
    assert!(matches!(err, PrefsError::Io(ref e) if e.kind() == io::ErrorKind::Other));
    assert!(prefs.is_empty());
}

#[test]
fn crlf_files_load_cleanly() {
    let prefs = PreferencesMap::from_reader("a = 1\r\n#c\r\nb=2\r\n".as_bytes(), Platform::Other)
        .unwrap();
    assert_eq!(prefs.get("a"), Some("1"));
    assert_eq!(prefs.get("b"), Some("2"));
    assert_eq!(prefs.len(), 2);
}

#[test]
fn render_loaded_file() {
    let prefs = PreferencesMap::from_reader("b=2\na=1\n".as_bytes(), Platform::Linux).unwrap();
    let rendered = prefs.to_string();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines, vec!["{", "a = 1", "b = 2"]);
}

#[test]
fn cli_config_file() {
    let file = write_temp("LOG_LEVEL=WARN\nINDENT=>>\nPLATFORM=macos\n");
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.log_level, tracing::Level::WARN);
    assert_eq!(config.indent, ">>");
    assert_eq!(config.platform, Some(Platform::Macos));
}
