use crate::config::ConfigError;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

// Standard library packages by the name code refers to them with. Where two
// packages share a name (`math/rand` and `crypto/rand`), the more common one wins.
const STANDARD_LIBRARY: &[(&str, &str)] = &[
    ("adler32", "hash/adler32"),
    ("aes", "crypto/aes"),
    ("ascii85", "encoding/ascii85"),
    ("asn1", "encoding/asn1"),
    ("ast", "go/ast"),
    ("atomic", "sync/atomic"),
    ("base32", "encoding/base32"),
    ("base64", "encoding/base64"),
    ("big", "math/big"),
    ("binary", "encoding/binary"),
    ("bufio", "bufio"),
    ("build", "go/build"),
    ("bytes", "bytes"),
    ("bzip2", "compress/bzip2"),
    ("cgi", "net/http/cgi"),
    ("cgo", "runtime/cgo"),
    ("cipher", "crypto/cipher"),
    ("cmp", "cmp"),
    ("cmplx", "math/cmplx"),
    ("color", "image/color"),
    ("context", "context"),
    ("crc32", "hash/crc32"),
    ("crc64", "hash/crc64"),
    ("crypto", "crypto"),
    ("csv", "encoding/csv"),
    ("debug", "runtime/debug"),
    ("des", "crypto/des"),
    ("doc", "go/doc"),
    ("draw", "image/draw"),
    ("driver", "database/sql/driver"),
    ("dsa", "crypto/dsa"),
    ("dwarf", "debug/dwarf"),
    ("ecdsa", "crypto/ecdsa"),
    ("elf", "debug/elf"),
    ("elliptic", "crypto/elliptic"),
    ("errors", "errors"),
    ("exec", "os/exec"),
    ("expvar", "expvar"),
    ("fcgi", "net/http/fcgi"),
    ("filepath", "path/filepath"),
    ("flag", "flag"),
    ("flate", "compress/flate"),
    ("fmt", "fmt"),
    ("fnv", "hash/fnv"),
    ("gif", "image/gif"),
    ("gob", "encoding/gob"),
    ("gosym", "debug/gosym"),
    ("gzip", "compress/gzip"),
    ("hash", "hash"),
    ("heap", "container/heap"),
    ("hex", "encoding/hex"),
    ("hmac", "crypto/hmac"),
    ("html", "html"),
    ("http", "net/http"),
    ("httputil", "net/http/httputil"),
    ("image", "image"),
    ("io", "io"),
    ("ioutil", "io/ioutil"),
    ("jpeg", "image/jpeg"),
    ("json", "encoding/json"),
    ("jsonrpc", "net/rpc/jsonrpc"),
    ("list", "container/list"),
    ("log", "log"),
    ("lzw", "compress/lzw"),
    ("macho", "debug/macho"),
    ("mail", "net/mail"),
    ("maps", "maps"),
    ("math", "math"),
    ("md5", "crypto/md5"),
    ("mime", "mime"),
    ("multipart", "mime/multipart"),
    ("net", "net"),
    ("netip", "net/netip"),
    ("os", "os"),
    ("parse", "text/template/parse"),
    ("parser", "go/parser"),
    ("path", "path"),
    ("pe", "debug/pe"),
    ("pem", "encoding/pem"),
    ("pkix", "crypto/x509/pkix"),
    ("png", "image/png"),
    ("pprof", "net/http/pprof"),
    ("printer", "go/printer"),
    ("rand", "math/rand"),
    ("rc4", "crypto/rc4"),
    ("reflect", "reflect"),
    ("regexp", "regexp"),
    ("ring", "container/ring"),
    ("rpc", "net/rpc"),
    ("rsa", "crypto/rsa"),
    ("runtime", "runtime"),
    ("scanner", "text/scanner"),
    ("sha1", "crypto/sha1"),
    ("sha256", "crypto/sha256"),
    ("sha512", "crypto/sha512"),
    ("signal", "os/signal"),
    ("slices", "slices"),
    ("slog", "log/slog"),
    ("smtp", "net/smtp"),
    ("sort", "sort"),
    ("sql", "database/sql"),
    ("strconv", "strconv"),
    ("strings", "strings"),
    ("subtle", "crypto/subtle"),
    ("suffixarray", "index/suffixarray"),
    ("sync", "sync"),
    ("syntax", "regexp/syntax"),
    ("syscall", "syscall"),
    ("syslog", "log/syslog"),
    ("tabwriter", "text/tabwriter"),
    ("tar", "archive/tar"),
    ("textproto", "net/textproto"),
    ("time", "time"),
    ("tls", "crypto/tls"),
    ("token", "go/token"),
    ("unicode", "unicode"),
    ("unsafe", "unsafe"),
    ("url", "net/url"),
    ("user", "os/user"),
    ("utf16", "unicode/utf16"),
    ("utf8", "unicode/utf8"),
    ("x509", "crypto/x509"),
    ("xml", "encoding/xml"),
    ("zip", "archive/zip"),
    ("zlib", "compress/zlib"),
];

/// Lookup table from the short name used in code to the canonical import path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRegistry {
    paths: HashMap<String, String>,
}

impl ImportRegistry {
    /// The standard library table.
    pub fn builtin() -> Self {
        STANDARD_LIBRARY
            .iter()
            .map(|(short, path)| (short.to_string(), path.to_string()))
            .collect()
    }

    /// Parse a JSON object of `{"short": "canonical/path"}` entries.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let paths: HashMap<String, String> = serde_json::from_str(text)?;
        Ok(Self { paths })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Registry {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Add every entry of `other`, replacing entries with the same short name.
    pub fn merge(&mut self, other: ImportRegistry) {
        self.paths.extend(other.paths);
    }

    pub fn resolve(&self, short: &str) -> Option<&str> {
        self.paths.get(short).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FromIterator<(String, String)> for ImportRegistry {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_knows_common_packages() {
        let registry = ImportRegistry::builtin();
        assert_eq!(registry.resolve("fmt"), Some("fmt"));
        assert_eq!(registry.resolve("rand"), Some("math/rand"));
        assert_eq!(registry.resolve("json"), Some("encoding/json"));
        assert_eq!(registry.resolve("filepath"), Some("path/filepath"));
        assert_eq!(registry.resolve("point"), None);
    }

    #[test]
    fn json_entries_override_builtin() {
        let mut registry = ImportRegistry::builtin();
        let extra =
            ImportRegistry::from_json(r#"{"rand": "crypto/rand", "yaml": "gopkg.in/yaml.v3"}"#)
                .unwrap();
        registry.merge(extra);
        assert_eq!(registry.resolve("rand"), Some("crypto/rand"));
        assert_eq!(registry.resolve("yaml"), Some("gopkg.in/yaml.v3"));
        assert_eq!(registry.resolve("fmt"), Some("fmt"));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            ImportRegistry::from_json("[1, 2]"),
            Err(ConfigError::RegistryFormat(_))
        ));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ImportRegistry::load(Path::new("/nonexistent/goeval-registry.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/goeval-registry.json"));
    }
}
