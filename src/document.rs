use std::collections::hash_map::{HashMap, Iter, Keys};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, FetchError, Result};
use crate::parser;

/// The keys and values of one section. Keys are lowercase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    keys: HashMap<String, String>,
}

impl Section {
    pub(crate) fn insert(&mut self, key: String, value: String) -> Option<String> {
        self.keys.insert(key, value)
    }

    /// Value of `key` (matched case-insensitively).
    pub fn get(&self, key: &str) -> Option<&str> {
        self.keys.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Whether `key` is present (matched case-insensitively).
    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains_key(&key.to_lowercase())
    }

    /// Iterate over the key names.
    pub fn keys(&self) -> Keys<'_, String, String> {
        self.keys.keys()
    }

    /// Iterate over `(key, value)` pairs.
    pub fn iter(&self) -> Iter<'_, String, String> {
        self.keys.iter()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the section holds no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<'a> IntoIterator for &'a Section {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

/// A parsed INI configuration: named sections of key/value pairs.
///
/// A `Document` is only produced by a successful parse and cannot be
/// modified afterwards, so it may be shared freely between threads.
/// Section and key names passed to the accessors are matched
/// case-insensitively. Listing order is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sections: HashMap<String, Section>,
}

impl Document {
    pub(crate) fn new(sections: HashMap<String, Section>) -> Document {
        Document { sections }
    }

    ///
    /// Parse a configuration from any `Read` object
    ///
    /// # Example
    ///
    /// ```
    /// use inilook::Document;
    ///
    /// let doc = Document::from_reader("[myapp]\nlog_level = DEBUG".as_bytes()).unwrap();
    /// assert_eq!(doc.read("myapp", "log_level"), "DEBUG");
    /// ```
    ///
    pub fn from_reader<R: Read>(r: R) -> Result<Document> {
        parser::parse(BufReader::new(r))
    }

    ///
    /// Parse a configuration file. The path is opened as given, and
    /// the file is closed again whether or not parsing succeeds.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use inilook::Document;
    ///
    /// let doc = Document::from_file("/etc/myapp/config.ini").unwrap();
    /// println!("Host is {}", doc.read("server", "host"));
    /// ```
    ///
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Document> {
        let p = path.as_ref();
        let f = File::open(p).map_err(|e| {
            warn!("Cannot open path {} for config: {}", p.display(), e);
            Error::Io(e)
        })?;
        Document::from_reader(f).map_err(|e| {
            warn!("Cannot load config {}: {}", p.display(), e);
            e
        })
    }

    /// Value of `key` in `section`, or `""` when either is absent.
    pub fn read(&self, section: &str, key: &str) -> &str {
        self.get(section, key).unwrap_or("")
    }

    /// Like `read`, but tells a missing section apart from a missing key.
    pub fn get(&self, section: &str, key: &str) -> std::result::Result<&str, FetchError> {
        self.section(section)
            .ok_or(FetchError::NoSuchSection)?
            .get(key)
            .ok_or(FetchError::NoSuchKey)
    }

    /// The section called `section`, if any.
    pub fn section(&self, section: &str) -> Option<&Section> {
        self.sections.get(&section.to_lowercase())
    }

    /// Whether a section called `section` exists.
    pub fn section_exists(&self, section: &str) -> bool {
        self.sections.contains_key(&section.to_lowercase())
    }

    /// Whether `section` exists and holds `key`.
    pub fn key_exists(&self, section: &str, key: &str) -> bool {
        self.section(section)
            .map_or(false, |s| s.contains_key(key))
    }

    /// Names of all sections.
    pub fn section_list(&self) -> Vec<String> {
        self.sections.keys().cloned().collect()
    }

    /// Names of all keys in `section`; empty if there is no such section.
    pub fn key_list(&self, section: &str) -> Vec<String> {
        match self.section(section) {
            Some(s) => s.keys().cloned().collect(),
            None => Vec::new(),
        }
    }

    /// Iterate over `(name, section)` pairs.
    pub fn sections(&self) -> Iter<'_, String, Section> {
        self.sections.iter()
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether no sections were read.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Document> {
        parser::parse(s.as_bytes())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::io::Write;

    fn init_log() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    const KAMUS: &str = "[kamus]\nmakan=eat\nMinum =  drink\nLIHAT = see = watch\n\n[STATUS]\nweb = active\n";

    fn sorted(mut v: Vec<String>) -> Vec<String> {
        v.sort();
        v
    }

    #[test]
    fn read_missing_is_empty() {
        let doc: Document = KAMUS.parse().unwrap();
        assert_eq!(doc.read("kamus", "tidur"), "");
        assert_eq!(doc.read("nowhere", "makan"), "");
    }

    #[test]
    fn case_insensitive_lookups() {
        let doc: Document = KAMUS.parse().unwrap();
        assert_eq!(doc.read("KAMUS", "Makan"), "eat");
        assert!(doc.section_exists("Status"));
        assert!(doc.key_exists("status", "WEB"));
        assert!(!doc.key_exists("status", "makan"));
        assert!(!doc.key_exists("missing", "web"));
        assert!(!doc.section_exists("missing"));
    }

    #[test]
    fn get_distinguishes_missing() {
        let doc: Document = "[a]\nempty =\n".parse().unwrap();
        assert_eq!(doc.get("a", "empty"), Ok(""));
        assert_eq!(doc.get("a", "other"), Err(FetchError::NoSuchKey));
        assert_eq!(doc.get("b", "empty"), Err(FetchError::NoSuchSection));
    }

    #[test]
    fn list_sections_and_keys() {
        let doc: Document = KAMUS.parse().unwrap();
        assert_eq!(sorted(doc.section_list()), vec!["kamus", "status"]);
        assert_eq!(sorted(doc.key_list("kamus")), vec!["lihat", "makan", "minum"]);
        assert_eq!(sorted(doc.key_list("STATUS")), vec!["web"]);
        assert!(doc.key_list("nope").is_empty());
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn iterate_section() {
        let doc: Document = KAMUS.parse().unwrap();
        let s = doc.section("kamus").unwrap();
        assert_eq!(s.len(), 3);
        let mut pairs: Vec<(&String, &String)> = s.into_iter().collect();
        pairs.sort_by(|&(k1, _), &(k2, _)| k1.cmp(k2));
        assert_eq!(pairs[0], (&"lihat".to_string(), &"see = watch".to_string()));
        assert_eq!(doc.sections().count(), 2);
    }

    #[test]
    fn from_reader_matches_from_str() {
        init_log();
        let a = Document::from_reader(KAMUS.as_bytes()).unwrap();
        let b: Document = KAMUS.parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn document_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Document>();
    }

    #[test]
    fn read_file() {
        init_log();
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(
            f,
            "[setting]\ncolor=red\nwidth=700\nheight=450\n\n[server]\nhost=10.10.20.20\nport=3344"
        )
        .unwrap();
        let doc = Document::from_file(f.path()).unwrap();
        assert_eq!(doc.read("setting", "color"), "red");
        assert_eq!(doc.read("setting", "width"), "700");
        assert_eq!(doc.read("setting", "height"), "450");
        assert_eq!(doc.read("server", "host"), "10.10.20.20");
        assert_eq!(doc.read("server", "port"), "3344");
    }

    #[test]
    fn read_file_parse_error() {
        init_log();
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[ok]\na = 1\n\nbroken").unwrap();
        let e = Document::from_file(f.path()).unwrap_err();
        assert!(matches!(e, Error::InvalidFormat { line: 4 }));
    }

    #[test]
    fn read_missing_file() {
        init_log();
        let dir = tempfile::tempdir().unwrap();
        let e = Document::from_file(dir.path().join("absent.ini")).unwrap_err();
        match e {
            Error::Io(ioe) => assert_eq!(ioe.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected I/O error, got {:?}", other),
        }
    }

    #[test]
    fn read_file_path_used_verbatim() {
        init_log();
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("~")).unwrap();
        std::fs::write(dir.path().join("~").join("app.ini"), "[a]\nk=v\n").unwrap();

        // only this test touches the working directory
        let cwd = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();
        let res = Document::from_file("~/app.ini");
        std::env::set_current_dir(cwd).unwrap();

        assert_eq!(res.unwrap().read("a", "k"), "v");
    }
}
