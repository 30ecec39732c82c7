//! Interned option symbols
//!
//! Host-facing APIs take keyword-style options ("dense", "transpose",
//! "upper", ...) as strings. This module interns the full vocabulary once
//! into a process-wide table so option parsing is a single hash lookup and
//! unknown names fail with [`Error::UnknownSymbol`] instead of being
//! silently treated as a fresh value.
//!
//! The vocabulary is fixed; conversions to the typed kernel and storage
//! enums live here so call sites never match on raw strings.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::kernel::{Diag, Side, Transpose, Uplo};
use crate::storage::StorageFormat;

/// One interned option symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// `dtype` - element type option key.
    Dtype,
    /// `stype` - storage type option key.
    Stype,
    /// `capacity` - Yale slot capacity option key.
    Capacity,
    /// `default` - sparse default element option key.
    Default,
    /// `hash` - list-of-pairs result selector.
    Hash,
    /// `real` - real component accessor.
    Real,
    /// `imag` - imaginary component accessor.
    Imag,
    /// `numerator` - rational numerator accessor.
    Numerator,
    /// `denominator` - rational denominator accessor.
    Denominator,
    /// `complex_conjugate` - conjugate-transpose operand flag.
    ComplexConjugate,
    /// `transpose` - transposed operand flag.
    Transpose,
    /// `no_transpose` - untransposed operand flag.
    NoTranspose,
    /// `dense` - dense storage format.
    Dense,
    /// `list` - list-of-rows storage format.
    List,
    /// `yale` - Yale storage format.
    Yale,
    /// `row` - row-wise iteration axis.
    Row,
    /// `column` - column-wise iteration axis.
    Column,
    /// `both` - both iteration axes.
    Both,
    /// `none` - no axis / absent option.
    None,
    /// `+` - addition operator.
    Add,
    /// `-` - subtraction operator.
    Sub,
    /// `*` - multiplication operator.
    Mul,
    /// `/` - division operator.
    Div,
    /// `-@` - unary negation operator.
    Negate,
    /// `%` - modulo operator.
    Percent,
    /// `==` - equality comparison.
    Eql,
    /// `!=` - inequality comparison.
    Neql,
    /// `>` - greater-than comparison.
    Gt,
    /// `<` - less-than comparison.
    Lt,
    /// `>=` - greater-or-equal comparison.
    Gte,
    /// `<=` - less-or-equal comparison.
    Lte,
    /// `left` - apply from the left.
    Left,
    /// `right` - apply from the right.
    Right,
    /// `upper` - upper triangle.
    Upper,
    /// `lower` - lower triangle.
    Lower,
    /// `unit` - implicit unit diagonal.
    Unit,
    /// `nonunit` - explicit diagonal.
    Nonunit,
    /// `DataTypeError` - host error class for dtype failures.
    DataTypeError,
    /// `ConvergenceError` - host error class for iterative-method failures.
    ConvergenceError,
    /// `StorageTypeError` - host error class for storage-format failures.
    StorageTypeError,
    /// `ShapeError` - host error class for shape failures.
    ShapeError,
    /// `NotInvertibleError` - host error class for singular matrices.
    NotInvertibleError,
}

impl Symbol {
    /// Every symbol in the vocabulary, in registration order.
    pub const ALL: [Symbol; 42] = [
        Symbol::Dtype,
        Symbol::Stype,
        Symbol::Capacity,
        Symbol::Default,
        Symbol::Hash,
        Symbol::Real,
        Symbol::Imag,
        Symbol::Numerator,
        Symbol::Denominator,
        Symbol::ComplexConjugate,
        Symbol::Transpose,
        Symbol::NoTranspose,
        Symbol::Dense,
        Symbol::List,
        Symbol::Yale,
        Symbol::Row,
        Symbol::Column,
        Symbol::Both,
        Symbol::None,
        Symbol::Add,
        Symbol::Sub,
        Symbol::Mul,
        Symbol::Div,
        Symbol::Negate,
        Symbol::Percent,
        Symbol::Eql,
        Symbol::Neql,
        Symbol::Gt,
        Symbol::Lt,
        Symbol::Gte,
        Symbol::Lte,
        Symbol::Left,
        Symbol::Right,
        Symbol::Upper,
        Symbol::Lower,
        Symbol::Unit,
        Symbol::Nonunit,
        Symbol::DataTypeError,
        Symbol::ConvergenceError,
        Symbol::StorageTypeError,
        Symbol::ShapeError,
        Symbol::NotInvertibleError,
    ];

    /// The interned spelling of this symbol.
    pub fn name(&self) -> &'static str {
        match self {
            Symbol::Dtype => "dtype",
            Symbol::Stype => "stype",
            Symbol::Capacity => "capacity",
            Symbol::Default => "default",
            Symbol::Hash => "hash",
            Symbol::Real => "real",
            Symbol::Imag => "imag",
            Symbol::Numerator => "numerator",
            Symbol::Denominator => "denominator",
            Symbol::ComplexConjugate => "complex_conjugate",
            Symbol::Transpose => "transpose",
            Symbol::NoTranspose => "no_transpose",
            Symbol::Dense => "dense",
            Symbol::List => "list",
            Symbol::Yale => "yale",
            Symbol::Row => "row",
            Symbol::Column => "column",
            Symbol::Both => "both",
            Symbol::None => "none",
            Symbol::Add => "+",
            Symbol::Sub => "-",
            Symbol::Mul => "*",
            Symbol::Div => "/",
            Symbol::Negate => "-@",
            Symbol::Percent => "%",
            Symbol::Eql => "==",
            Symbol::Neql => "!=",
            Symbol::Gt => ">",
            Symbol::Lt => "<",
            Symbol::Gte => ">=",
            Symbol::Lte => "<=",
            Symbol::Left => "left",
            Symbol::Right => "right",
            Symbol::Upper => "upper",
            Symbol::Lower => "lower",
            Symbol::Unit => "unit",
            Symbol::Nonunit => "nonunit",
            Symbol::DataTypeError => "DataTypeError",
            Symbol::ConvergenceError => "ConvergenceError",
            Symbol::StorageTypeError => "StorageTypeError",
            Symbol::ShapeError => "ShapeError",
            Symbol::NotInvertibleError => "NotInvertibleError",
        }
    }

    /// Interpret this symbol as a storage format.
    pub fn as_storage_format(&self) -> Result<StorageFormat> {
        match self {
            Symbol::Dense => Ok(StorageFormat::Dense),
            Symbol::List => Ok(StorageFormat::List),
            Symbol::Yale => Ok(StorageFormat::Yale),
            _ => Err(Error::invalid_argument(
                "stype",
                format!("{} is not a storage format", self.name()),
            )),
        }
    }

    /// Interpret this symbol as an operand transpose flag.
    pub fn as_transpose(&self) -> Result<Transpose> {
        match self {
            Symbol::NoTranspose => Ok(Transpose::NoTrans),
            Symbol::Transpose => Ok(Transpose::Trans),
            Symbol::ComplexConjugate => Ok(Transpose::ConjTrans),
            _ => Err(Error::invalid_argument(
                "transpose",
                format!("{} is not a transpose flag", self.name()),
            )),
        }
    }

    /// Interpret this symbol as a triangle selector.
    pub fn as_uplo(&self) -> Result<Uplo> {
        match self {
            Symbol::Upper => Ok(Uplo::Upper),
            Symbol::Lower => Ok(Uplo::Lower),
            _ => Err(Error::invalid_argument(
                "uplo",
                format!("{} is not a triangle selector", self.name()),
            )),
        }
    }

    /// Interpret this symbol as a diagonal kind.
    pub fn as_diag(&self) -> Result<Diag> {
        match self {
            Symbol::Unit => Ok(Diag::Unit),
            Symbol::Nonunit => Ok(Diag::NonUnit),
            _ => Err(Error::invalid_argument(
                "diag",
                format!("{} is not a diagonal kind", self.name()),
            )),
        }
    }

    /// Interpret this symbol as an application side.
    pub fn as_side(&self) -> Result<Side> {
        match self {
            Symbol::Left => Ok(Side::Left),
            Symbol::Right => Ok(Side::Right),
            _ => Err(Error::invalid_argument(
                "side",
                format!("{} is not a side", self.name()),
            )),
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The interned symbol table, name to symbol.
pub struct SymbolTable {
    by_name: HashMap<&'static str, Symbol>,
}

impl SymbolTable {
    fn build() -> Self {
        let mut by_name = HashMap::with_capacity(Symbol::ALL.len());
        for sym in Symbol::ALL {
            by_name.insert(sym.name(), sym);
        }
        log::debug!("symbol table interned {} names", by_name.len());
        Self { by_name }
    }

    /// Look up a symbol by its spelling.
    pub fn lookup(&self, name: &str) -> Result<Symbol> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownSymbol {
                name: name.to_string(),
            })
    }

    /// Number of interned names.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// True when the table is empty; never the case after construction.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Access the process-wide symbol table, interning it on first use.
pub fn symbols() -> &'static SymbolTable {
    static TABLE: OnceLock<SymbolTable> = OnceLock::new();
    TABLE.get_or_init(SymbolTable::build)
}
