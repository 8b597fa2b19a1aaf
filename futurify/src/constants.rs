use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Literal prefix that introduces a `__future__` import statement.
///
/// Note the trailing space: a line matches only when the keyword list
/// actually follows, so `from __future__ importx` is not an occurrence.
pub const LEADER: &str = "from __future__ import ";

/// Maximum line width for canonical import statements.
pub const DEFAULT_LINE_LENGTH: usize = 80;

/// Extension of the files a tree walk rewrites.
pub const PYTHON_EXTENSION: &str = "py";

/// Name of the standalone configuration file.
pub const CONFIG_FILENAME: &str = ".futurify.toml";

/// Name of the packaging manifest that may carry a `[tool.futurify]` table.
pub const PYPROJECT_FILENAME: &str = "pyproject.toml";

/// Block of recommended flags, appended to the usage message when the
/// invocation named paths but no `+`/`-` keywords.
pub const RECOMMENDATIONS: &str = "
Some recommended __future__ imports for Python 3 compatibility are:

    +absolute_import
    +division
    +print_function
    +unicode_literals

See https://docs.python.org/2/library/__future__.html for an up-to-date list.";

/// Set of folders to exclude from tree walks by default.
pub fn get_default_exclude_folders() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        let mut s = FxHashSet::default();
        s.insert("__pycache__");
        s.insert(".git");
        s.insert(".pytest_cache");
        s.insert(".mypy_cache");
        s.insert(".tox");
        s.insert(".eggs");
        s.insert("*.egg-info");
        s.insert("build");
        s.insert("dist");
        s.insert("node_modules");
        s.insert("venv");
        s.insert(".venv");
        s
    })
}

pub use get_default_exclude_folders as DEFAULT_EXCLUDE_FOLDERS;
