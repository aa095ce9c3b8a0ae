// Converter Error Handling

use thiserror::Error;

use crate::luminary::opcodes::Opcode;

#[derive(Error, Debug)]
pub enum ConvertError {
    // Producer contract violations
    #[error("Unknown opcode {opcode} at instruction {index} of node '{node}'")]
    UnknownOpcode {
        node: String,
        index: usize,
        opcode: String,
    },

    #[error(
        "{opcode} at instruction {index} of node '{node}' expects {expected} operands, found {found}"
    )]
    OperandCount {
        node: String,
        index: usize,
        opcode: Opcode,
        expected: String,
        found: usize,
    },

    #[error(
        "{opcode} at instruction {index} of node '{node}': operand {position} must be a {expected}"
    )]
    OperandKind {
        node: String,
        index: usize,
        opcode: Opcode,
        position: usize,
        expected: &'static str,
    },

    #[error("{opcode} at instruction {index} of node '{node}': invalid operand '{value}'")]
    InvalidOperand {
        node: String,
        index: usize,
        opcode: Opcode,
        value: String,
    },

    #[error("Label '{label}' in node '{node}' points at instruction {index}, node has {len}")]
    DanglingLabel {
        node: String,
        label: String,
        index: usize,
        len: usize,
    },

    // Upstream failures
    #[error("Compile error, no program produced{}", format_diagnostics(.0))]
    CompileFailed(Vec<String>),

    #[error("Malformed compiled script: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    // Output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Formatting error")]
    Format(#[from] std::fmt::Error),
}

fn format_diagnostics(diagnostics: &[String]) -> String {
    if diagnostics.is_empty() {
        String::new()
    } else {
        format!(":\n  {}", diagnostics.join("\n  "))
    }
}
