//! Documentation content for the sq CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Operators,
    Paths,
    Schemas,
    Errors,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "operators" | "ops" => Some(Self::Operators),
            "paths" | "path" | "resolve" => Some(Self::Paths),
            "schemas" | "schema" => Some(Self::Schemas),
            "errors" | "error" => Some(Self::Errors),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"SQ DOCUMENTATION

sq checks whether a JSON record satisfies a query. Queries are JSON trees:
an array is an operator call ["op", arg...], any other value is a literal.

DOCUMENTATION CATEGORIES

  operators         The operator vocabulary and broadcast rule
  paths             Resolve paths and the [item] wildcard
  schemas           Supported JSON-Schema keywords
  errors            Failure kinds and what causes them

QUICK REFERENCE

  ["eq", ["resolve", "subject", "karyotypic_sex"], "XO"]
  ["co", ["resolve", "biosamples", "[item]", "procedure", "code", "id"], "TE"]
  ["and", <query>, <query>]

Run 'sq doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Paths) => Ok(PATHS_DOC),
        Some(DocCategory::Schemas) => Ok(SCHEMAS_DOC),
        Some(DocCategory::Errors) => Ok(ERRORS_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const OPERATORS_DOC: &str = r##"OPERATORS

  TOKEN     ARGS  MEANING
  and       2     both operands are true
  or        2     either operand is true
  not       1     the operand does not match
  lt        2     left < right
  le        2     left <= right
  eq        2     left == right (1 and 1.0 are equal)
  gt        2     left > right
  ge        2     left >= right
  co        2     right is a member of left (array element, object key,
                  or substring of a string)
  resolve   0..n  value at a path, see 'sq doc paths'

  Tokens may carry a leading '#' ("#eq"), as older serialized queries do.

BROADCASTING
  When a path crosses an array, it yields one value per element. Binary
  operators test every left/right combination and match if any does:

    Input:  {"items": [{"v": 1}, {"v": 2}]}
    Query:  ["eq", ["resolve", "items", "[item]", "v"], 2]
    Result: true

  'not' negates the outcome of its whole operand, not each element.

ORDERING
  Numbers order numerically, strings lexicographically, booleans with
  false < true. Comparing other pairings is a type mismatch.

NULL
  A property missing from the record resolves to null. Null never satisfies
  an ordering or 'co', and counts as false inside 'and' and 'or'.
"##;

const PATHS_DOC: &str = r#"PATHS

  ["resolve"]
    The whole record.

  ["resolve", "subject", "karyotypic_sex"]
    Walk object properties. Each name must be declared by the schema.

  ["resolve", "biosamples", "[item]", "procedure"]
    [item] steps into every element of an array and yields one value
    per element.

  Constraints:
    - A property missing from the data resolves to null
    - Only one array level may be crossed per path
    - Paths may not continue past a string, number, integer or boolean
"#;

const SCHEMAS_DOC: &str = r#"SCHEMAS

  Schemas use a subset of JSON Schema:

    {"type": "object", "properties": {...}, "required": [...]}
    {"type": "array", "items": {...}}
    {"type": "string" | "number" | "integer" | "boolean"}

  Other keywords are ignored. Records are validated before a query runs;
  undeclared properties are allowed, declared ones must have the right type.
"#;

const ERRORS_DOC: &str = r#"ERRORS

  InvalidDataStructure      the record does not conform to the schema
  MalformedQuery            empty call, wrong argument count, bad path segment
  UnknownOperator           call starts with an unregistered token
  UnknownProperty           path names a property the schema does not declare
  InvalidArrayAccess        [item] on a non-array, or a name on an array
  CannotDescendIntoScalar   path continues past a scalar
  TypeMismatch              operands the operator cannot handle
  QueryTooComplex           nesting, path length or nested arrays over the limit
"#;
