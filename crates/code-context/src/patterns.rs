//! Per-language pattern tables.
//!
//! Each registered language carries ordered regular expressions for the
//! lexical opener of functions, variables and classes, single-line import
//! and comment detectors, and narrower patterns that capture identifiers.
//! These are heuristics, not a grammar: multi-line signatures and unusual
//! formatting are not recognised.

use crate::config::ResolverConfig;
use crate::error::{ContextError, Result};
use crate::language::Language;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Syntactic category a pattern recognises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternCategory {
    Function,
    Variable,
    Class,
    Import,
    Comment,
}

impl PatternCategory {
    pub const ALL: [PatternCategory; 5] = [
        PatternCategory::Function,
        PatternCategory::Variable,
        PatternCategory::Class,
        PatternCategory::Import,
        PatternCategory::Comment,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PatternCategory::Function => "function",
            PatternCategory::Variable => "variable",
            PatternCategory::Class => "class",
            PatternCategory::Import => "import",
            PatternCategory::Comment => "comment",
        }
    }
}

struct BuiltinPatterns {
    function: &'static [&'static str],
    variable: &'static [&'static str],
    class: &'static [&'static str],
    import: &'static [&'static str],
    comment: &'static [&'static str],
    function_name: &'static [&'static str],
    variable_name: &'static [&'static str],
    class_name: &'static [&'static str],
    structure: BuiltinStructure,
}

struct BuiltinStructure {
    control_flow: &'static [&'static str],
    sequence: &'static [&'static str],
    parameters: &'static [&'static str],
    return_type: &'static [&'static str],
    method: &'static [&'static str],
    property: &'static [&'static str],
}

const JAVASCRIPT: BuiltinPatterns = BuiltinPatterns {
    function: &[
        r"function\s+\w+\s*\([^)]*\)\s*\{",
        r"const\s+\w+\s*=\s*\([^)]*\)\s*=>",
        r"let\s+\w+\s*=\s*\([^)]*\)\s*=>",
        r"var\s+\w+\s*=\s*\([^)]*\)\s*=>",
        r"async\s+function\s+\w+\s*\([^)]*\)\s*\{",
    ],
    variable: &[
        r"(?:const|let|var)\s+\w+\s*=",
        r"const\s+\w+\s*:\s*\w*\s*=",
        r"let\s+\w+\s*:\s*\w*\s*=",
        r"var\s+\w+\s*:\s*\w*\s*=",
    ],
    class: &[
        r"class\s+\w+",
        r"class\s+\w+\s+extends",
        r"class\s+\w+\s+implements",
    ],
    import: &[r"^import\s+"],
    comment: &[r"^\s*//"],
    function_name: &[
        r"function\s+(\w+)",
        r"(?:const|let|var)\s+(\w+)\s*=\s*(?:async\s*)?\([^)]*\)\s*=>",
    ],
    variable_name: &[r"(?:const|let|var)\s+(\w+)"],
    class_name: &[r"class\s+(\w+)"],
    structure: BuiltinStructure {
        control_flow: &[r"\b(?:if|for|while|switch)\s*\(", r"\belse\s*\{"],
        sequence: &[r"\bawait\s+", r"\bPromise\.", r"\.then\(", r"\.catch\("],
        parameters: &[
            r"function\s*\w*\s*\(([^)]*)\)",
            r"\(([^)]*)\)\s*=>",
            r"^\s*(?:async\s+)?\w+\s*\(([^)]*)\)\s*\{",
        ],
        return_type: &[],
        method: &[r"^(?:async\s+)?(?:static\s+)?(?:get\s+|set\s+)?(\w+)\s*\([^)]*\)\s*\{"],
        property: &[
            r"^(?:static\s+)?(\w+)\s*=(?:[^=>]|$)",
            r"^this\.(\w+)\s*=(?:[^=]|$)",
        ],
    },
};

const TYPESCRIPT: BuiltinPatterns = BuiltinPatterns {
    function: &[
        r"function\s+\w+\s*\([^)]*\)\s*\{",
        r"const\s+\w+\s*:\s*\w*\s*=\s*\([^)]*\)\s*=>",
        r"let\s+\w+\s*:\s*\w*\s*=\s*\([^)]*\)\s*=>",
        r"var\s+\w+\s*:\s*\w*\s*=\s*\([^)]*\)\s*=>",
        r"async\s+function\s+\w+\s*\([^)]*\)\s*\{",
        r"(?:const|let|var)\s+\w+\s*=\s*\([^)]*\)\s*(?::\s*\w+\s*)?=>",
    ],
    variable: &[
        r"(?:const|let|var)\s+\w+\s*:\s*\w*\s*=",
        r"(?:const|let|var)\s+\w+\s*=",
    ],
    class: &[
        r"class\s+\w+",
        r"class\s+\w+\s+extends",
        r"class\s+\w+\s+implements",
        r"abstract\s+class\s+\w+",
    ],
    import: &[r"^import\s+"],
    comment: &[r"^\s*//"],
    function_name: &[
        r"function\s+(\w+)",
        r"(?:const|let|var)\s+(\w+)\s*(?::\s*\w*\s*)?=\s*(?:async\s*)?\([^)]*\)",
    ],
    variable_name: &[r"(?:const|let|var)\s+(\w+)"],
    class_name: &[r"class\s+(\w+)"],
    structure: BuiltinStructure {
        control_flow: &[r"\b(?:if|for|while|switch)\s*\(", r"\belse\s*\{"],
        sequence: &[r"\bawait\s+", r"\bPromise\.", r"\.then\(", r"\.catch\("],
        parameters: &[
            r"function\s*\w*\s*\(([^)]*)\)",
            r"\(([^)]*)\)\s*(?::\s*[\w<>\[\]|]+\s*)?=>",
            r"^\s*(?:(?:public|private|protected|static|async)\s+)*\w+\s*\(([^)]*)\)",
        ],
        return_type: &[r"\)\s*:\s*([\w<>\[\]|]+)\s*(?:\{|=>)"],
        method: &[
            r"^(?:(?:public|private|protected|static|async|abstract)\s+)*(?:get\s+|set\s+)?(\w+)\s*\([^)]*\)\s*(?::\s*[\w<>\[\]|]+\s*)?\{",
        ],
        property: &[
            r"^(?:(?:public|private|protected|static|readonly)\s+)*(\w+)[?!]?\s*:",
            r"^(?:(?:public|private|protected|static|readonly)\s+)*(\w+)\s*=(?:[^=>]|$)",
            r"^this\.(\w+)\s*=(?:[^=]|$)",
        ],
    },
};

const PYTHON: BuiltinPatterns = BuiltinPatterns {
    function: &[
        r"def\s+\w+\s*\([^)]*\)\s*:",
        r"async\s+def\s+\w+\s*\([^)]*\)\s*:",
    ],
    variable: &[r"\w+\s*=", r"(?:global\s+)?\w+\s*:"],
    class: &[
        r"class\s+\w+",
        r"class\s+\w+\s*\(",
        r"class\s+\w+\s*\([^)]*\)",
    ],
    import: &[r"^(?:import|from)\s+"],
    comment: &[r"^\s*#"],
    function_name: &[r"def\s+(\w+)"],
    variable_name: &[r"(\w+)\s*="],
    class_name: &[r"class\s+(\w+)"],
    structure: BuiltinStructure {
        control_flow: &[r"(?m)^\s*(?:if|elif|for|while)\b[^\n]*:\s*$", r"(?m)^\s*else\s*:"],
        sequence: &[r"\bawait\s+", r"\basyncio\."],
        parameters: &[r"def\s+\w+\s*\(([^)]*)\)"],
        return_type: &[r"\)\s*->\s*([^:]+?)\s*:"],
        method: &[r"^(?:async\s+)?def\s+(\w+)"],
        property: &[r"^self\.(\w+)\s*(?::[^=]*)?=(?:[^=]|$)"],
    },
};

const JAVA: BuiltinPatterns = BuiltinPatterns {
    function: &[
        r"(?:public|private|protected)?\s*(?:static\s+)?\w+\s+\w+\s*\([^)]*\)\s*\{",
        r"(?:public|private|protected)?\s*(?:static\s+)?\w+\s+\w+\s*\([^)]*\)\s*throws\s+\w+\s*\{",
    ],
    variable: &[
        r"(?:final\s+)?(?:public|private|protected)?\s*\w+\s+\w+\s*;",
        r"(?:final\s+)?(?:public|private|protected)?\s*\w+\s+\w+\s*=",
    ],
    class: &[
        r"(?:public|private|protected)?\s*class\s+\w+",
        r"(?:public|private|protected)?\s*abstract\s+class\s+\w+",
        r"(?:public|private|protected)?\s*class\s+\w+\s+extends",
        r"(?:public|private|protected)?\s*class\s+\w+\s+implements",
    ],
    import: &[r"^import\s+"],
    comment: &[r"^\s*//"],
    function_name: &[r"(\w+)\s*\([^)]*\)\s*(?:throws\s+\w+\s*)?\{"],
    variable_name: &[r"(\w+)\s*[=;]"],
    class_name: &[r"class\s+(\w+)"],
    structure: BuiltinStructure {
        control_flow: &[r"\b(?:if|for|while|switch)\s*\(", r"\belse\s*\{"],
        sequence: &[r"\bCompletableFuture\.", r"\.thenApply\(", r"\.thenAccept\(", r"\.join\(\)"],
        parameters: &[r"\w+\s*\(([^)]*)\)\s*(?:throws\s+\w+\s*)?\{"],
        return_type: &[r"([\w<>\[\]]+)\s+\w+\s*\([^)]*\)\s*(?:throws\s+\w+\s*)?\{"],
        method: &[
            r"^(?:(?:public|private|protected|static|final|abstract|synchronized)\s+)*[\w<>\[\]]+\s+(\w+)\s*\(",
        ],
        property: &[
            r"^(?:(?:public|private|protected|static|final|transient|volatile)\s+)*[\w<>\[\]]+\s+(\w+)\s*(?:;|=)",
        ],
    },
};

/// Compiled patterns used by structural analysis
///
/// `parameters`, `return_type`, `method` and `property` capture the
/// interesting part in group 1. Method and property patterns are tested
/// against trimmed lines.
#[derive(Debug, Clone)]
pub struct StructurePatterns {
    pub control_flow: Vec<Regex>,
    pub sequence: Vec<Regex>,
    pub parameters: Vec<Regex>,
    pub return_type: Vec<Regex>,
    pub method: Vec<Regex>,
    pub property: Vec<Regex>,
}

/// Compiled patterns for one language
#[derive(Debug, Clone)]
struct LanguagePatterns {
    function: Vec<Regex>,
    variable: Vec<Regex>,
    class: Vec<Regex>,
    import: Vec<Regex>,
    comment: Vec<Regex>,
    function_name: Vec<Regex>,
    variable_name: Vec<Regex>,
    class_name: Vec<Regex>,
    structure: StructurePatterns,
}

impl LanguagePatterns {
    fn compile(language: Language, builtin: &BuiltinPatterns) -> Result<Self> {
        let compile = |category: &str, sources: &[&str]| -> Result<Vec<Regex>> {
            sources
                .iter()
                .map(|source| {
                    Regex::new(source).map_err(|err| {
                        ContextError::invalid_pattern(language.as_str(), category, err)
                    })
                })
                .collect()
        };

        Ok(Self {
            function: compile("function", builtin.function)?,
            variable: compile("variable", builtin.variable)?,
            class: compile("class", builtin.class)?,
            import: compile("import", builtin.import)?,
            comment: compile("comment", builtin.comment)?,
            function_name: compile("function_name", builtin.function_name)?,
            variable_name: compile("variable_name", builtin.variable_name)?,
            class_name: compile("class_name", builtin.class_name)?,
            structure: StructurePatterns {
                control_flow: compile("control_flow", builtin.structure.control_flow)?,
                sequence: compile("sequence", builtin.structure.sequence)?,
                parameters: compile("parameters", builtin.structure.parameters)?,
                return_type: compile("return_type", builtin.structure.return_type)?,
                method: compile("method", builtin.structure.method)?,
                property: compile("property", builtin.structure.property)?,
            },
        })
    }

    fn category(&self, category: PatternCategory) -> &[Regex] {
        match category {
            PatternCategory::Function => &self.function,
            PatternCategory::Variable => &self.variable,
            PatternCategory::Class => &self.class,
            PatternCategory::Import => &self.import,
            PatternCategory::Comment => &self.comment,
        }
    }

    fn category_mut(&mut self, category: PatternCategory) -> &mut Vec<Regex> {
        match category {
            PatternCategory::Function => &mut self.function,
            PatternCategory::Variable => &mut self.variable,
            PatternCategory::Class => &mut self.class,
            PatternCategory::Import => &mut self.import,
            PatternCategory::Comment => &mut self.comment,
        }
    }

    fn names(&self, category: PatternCategory) -> &[Regex] {
        match category {
            PatternCategory::Function => &self.function_name,
            PatternCategory::Variable => &self.variable_name,
            PatternCategory::Class => &self.class_name,
            PatternCategory::Import | PatternCategory::Comment => &[],
        }
    }
}

/// Immutable pattern tables for every registered language
///
/// Built once and shared by reference; lookups for [`Language::Unknown`]
/// are served from the JavaScript table.
#[derive(Debug, Clone)]
pub struct PatternTables {
    javascript: LanguagePatterns,
    typescript: LanguagePatterns,
    python: LanguagePatterns,
    java: LanguagePatterns,
}

impl PatternTables {
    /// Build the built-in tables
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            javascript: LanguagePatterns::compile(Language::JavaScript, &JAVASCRIPT)?,
            typescript: LanguagePatterns::compile(Language::TypeScript, &TYPESCRIPT)?,
            python: LanguagePatterns::compile(Language::Python, &PYTHON)?,
            java: LanguagePatterns::compile(Language::Java, &JAVA)?,
        })
    }

    /// Build the built-in tables and append configured extra patterns
    ///
    /// Extra patterns are tried after the built-in ones of the same category.
    pub fn from_config(config: &ResolverConfig) -> Result<Self> {
        config.validate()?;
        let mut tables = Self::builtin()?;
        let mut configured: Vec<Language> = Vec::new();

        for (id, extra) in &config.patterns {
            let language = Language::from_id(id);
            if configured.contains(&language) {
                log::warn!("patterns.{id} adds to the {language} table configured under another id");
            } else {
                configured.push(language);
            }
            let table = tables.table_mut(language);
            for category in PatternCategory::ALL {
                for source in extra.for_category(category) {
                    let regex = Regex::new(source).map_err(|err| {
                        ContextError::invalid_pattern(language.as_str(), category.as_str(), err)
                    })?;
                    log::debug!(
                        "registered extra {} pattern for {language}: {source}",
                        category.as_str()
                    );
                    table.category_mut(category).push(regex);
                }
            }
        }

        Ok(tables)
    }

    /// Ordered opener patterns of `category` for `language`
    pub fn patterns_for(&self, language: Language, category: PatternCategory) -> &[Regex] {
        self.table(language).category(category)
    }

    /// Ordered identifier-capturing patterns for `category`
    ///
    /// Import and comment categories have no name patterns.
    pub fn name_patterns_for(&self, language: Language, category: PatternCategory) -> &[Regex] {
        self.table(language).names(category)
    }

    /// Patterns used for shape, signature and member analysis
    pub fn structure_for(&self, language: Language) -> &StructurePatterns {
        &self.table(language).structure
    }

    /// Whether a single line is an import statement
    pub fn is_import_line(&self, language: Language, line: &str) -> bool {
        let trimmed = line.trim();
        self.patterns_for(language, PatternCategory::Import)
            .iter()
            .any(|pattern| pattern.is_match(trimmed))
    }

    /// Whether a single line is a line comment
    pub fn is_comment_line(&self, language: Language, line: &str) -> bool {
        let trimmed = line.trim();
        self.patterns_for(language, PatternCategory::Comment)
            .iter()
            .any(|pattern| pattern.is_match(trimmed))
    }

    fn table(&self, language: Language) -> &LanguagePatterns {
        match language.pattern_source() {
            Language::TypeScript => &self.typescript,
            Language::Python => &self.python,
            Language::Java => &self.java,
            Language::JavaScript | Language::Unknown => &self.javascript,
        }
    }

    fn table_mut(&mut self, language: Language) -> &mut LanguagePatterns {
        match language.pattern_source() {
            Language::TypeScript => &mut self.typescript,
            Language::Python => &mut self.python,
            Language::Java => &mut self.java,
            Language::JavaScript | Language::Unknown => &mut self.javascript,
        }
    }
}
