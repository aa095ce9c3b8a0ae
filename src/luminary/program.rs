// Compiled Yarn Program Model
//
// The read-only data handed over by the Yarn compiler: nodes of stack-machine
// instructions plus the string table. Raw* types mirror the on-disk compiled
// script document; `CompiledScript::into_parts` checks the producer contract
// and yields the typed model used by code generation.

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use crate::luminary::error::ConvertError;
use crate::luminary::opcodes::Opcode;

/// A literal value attached to a raw instruction
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    Bool(bool),
    Float(f64),
    String(String),
}

/// A decoded instruction, operands bound to their meaning
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    JumpTo {
        label: String,
    },
    Jump,
    RunLine {
        string_id: String,
        /// Inline expressions popped from the stack into the line
        substitutions: usize,
    },
    RunCommand {
        command: String,
        substitutions: usize,
    },
    AddOption {
        string_id: String,
        destination: String,
        substitutions: usize,
        /// A condition result is popped to decide whether the option is available
        conditional: bool,
    },
    ShowOptions,
    PushString {
        string_id: String,
    },
    /// Single precision, as the Yarn runtime stores numbers
    PushFloat {
        value: f32,
    },
    PushBool {
        value: bool,
    },
    PushNull,
    JumpIfFalse {
        label: String,
    },
    Pop,
    CallFunc {
        function: String,
    },
    PushVariable {
        variable: String,
    },
    StoreVariable {
        variable: String,
    },
    Stop,
    RunNode,
}

/// Operand problems found while decoding a single instruction
#[derive(Debug, Clone, PartialEq)]
pub enum OperandError {
    Count { expected: String, found: usize },
    Kind { position: usize, expected: &'static str },
    Invalid { value: String },
}

impl OperandError {
    fn in_context(self, node: &str, index: usize, opcode: Opcode) -> ConvertError {
        let node = node.to_string();
        match self {
            OperandError::Count { expected, found } => ConvertError::OperandCount {
                node,
                index,
                opcode,
                expected,
                found,
            },
            OperandError::Kind { position, expected } => ConvertError::OperandKind {
                node,
                index,
                opcode,
                position,
                expected,
            },
            OperandError::Invalid { value } => ConvertError::InvalidOperand {
                node,
                index,
                opcode,
                value,
            },
        }
    }
}

/// Typed access to the operand list of one raw instruction
struct Operands<'a> {
    operands: &'a [Operand],
}

impl<'a> Operands<'a> {
    fn new(operands: &'a [Operand], min: usize, max: usize) -> Result<Self, OperandError> {
        if (min..=max).contains(&operands.len()) {
            return Ok(Operands { operands });
        }

        let expected = if min == max {
            min.to_string()
        } else {
            format!("{} to {}", min, max)
        };
        Err(OperandError::Count {
            expected,
            found: operands.len(),
        })
    }

    fn string(&self, position: usize) -> Result<String, OperandError> {
        match &self.operands[position] {
            Operand::String(s) => Ok(s.clone()),
            _ => Err(OperandError::Kind {
                position,
                expected: "string",
            }),
        }
    }

    /// Numbers may arrive as floats or as their textual form
    fn number(&self, position: usize) -> Result<f64, OperandError> {
        let value = match &self.operands[position] {
            Operand::Float(n) => *n,
            Operand::String(s) => s.trim().parse::<f64>().map_err(|_| OperandError::Invalid {
                value: s.clone(),
            })?,
            Operand::Bool(_) => {
                return Err(OperandError::Kind {
                    position,
                    expected: "number",
                })
            }
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(OperandError::Invalid {
                value: value.to_string(),
            })
        }
    }

    /// Numbers narrowed to single precision. Rounding to the nearest f32
    /// happens before any truncation, so "2.99999999" becomes 3.0.
    fn single(&self, position: usize) -> Result<f32, OperandError> {
        let value = match &self.operands[position] {
            Operand::Float(n) => *n as f32,
            Operand::String(s) => s.trim().parse::<f32>().map_err(|_| OperandError::Invalid {
                value: s.clone(),
            })?,
            Operand::Bool(_) => {
                return Err(OperandError::Kind {
                    position,
                    expected: "number",
                })
            }
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(OperandError::Invalid {
                value: value.to_string(),
            })
        }
    }

    fn boolean(&self, position: usize) -> Result<bool, OperandError> {
        match &self.operands[position] {
            Operand::Bool(b) => Ok(*b),
            Operand::String(s) => {
                let text = s.trim();
                if text.eq_ignore_ascii_case("true") {
                    Ok(true)
                } else if text.eq_ignore_ascii_case("false") {
                    Ok(false)
                } else {
                    Err(OperandError::Invalid { value: s.clone() })
                }
            }
            Operand::Float(_) => Err(OperandError::Kind {
                position,
                expected: "bool",
            }),
        }
    }

    fn optional_count(&self, position: usize) -> Result<usize, OperandError> {
        if position >= self.operands.len() {
            return Ok(0);
        }
        let value = self.number(position)?;
        if value < 0.0 {
            return Err(OperandError::Invalid {
                value: value.to_string(),
            });
        }
        Ok(value as usize)
    }

    fn optional_bool(&self, position: usize) -> Result<bool, OperandError> {
        if position >= self.operands.len() {
            return Ok(false);
        }
        self.boolean(position)
    }
}

impl Instruction {
    /// Bind the raw operand list of `opcode` to a typed instruction
    pub fn decode(opcode: Opcode, operands: &[Operand]) -> Result<Instruction, OperandError> {
        let instruction = match opcode {
            Opcode::JumpTo => {
                let ops = Operands::new(operands, 1, 1)?;
                Instruction::JumpTo {
                    label: ops.string(0)?,
                }
            }
            Opcode::Jump => {
                Operands::new(operands, 0, 0)?;
                Instruction::Jump
            }
            Opcode::RunLine => {
                let ops = Operands::new(operands, 1, 2)?;
                Instruction::RunLine {
                    string_id: ops.string(0)?,
                    substitutions: ops.optional_count(1)?,
                }
            }
            Opcode::RunCommand => {
                let ops = Operands::new(operands, 1, 2)?;
                Instruction::RunCommand {
                    command: ops.string(0)?,
                    substitutions: ops.optional_count(1)?,
                }
            }
            Opcode::AddOption => {
                let ops = Operands::new(operands, 2, 4)?;
                Instruction::AddOption {
                    string_id: ops.string(0)?,
                    destination: ops.string(1)?,
                    substitutions: ops.optional_count(2)?,
                    conditional: ops.optional_bool(3)?,
                }
            }
            Opcode::ShowOptions => {
                Operands::new(operands, 0, 0)?;
                Instruction::ShowOptions
            }
            Opcode::PushString => {
                let ops = Operands::new(operands, 1, 1)?;
                Instruction::PushString {
                    string_id: ops.string(0)?,
                }
            }
            Opcode::PushFloat => {
                let ops = Operands::new(operands, 1, 1)?;
                Instruction::PushFloat {
                    value: ops.single(0)?,
                }
            }
            Opcode::PushBool => {
                let ops = Operands::new(operands, 1, 1)?;
                Instruction::PushBool {
                    value: ops.boolean(0)?,
                }
            }
            Opcode::PushNull => {
                Operands::new(operands, 0, 0)?;
                Instruction::PushNull
            }
            Opcode::JumpIfFalse => {
                let ops = Operands::new(operands, 1, 1)?;
                Instruction::JumpIfFalse {
                    label: ops.string(0)?,
                }
            }
            Opcode::Pop => {
                Operands::new(operands, 0, 0)?;
                Instruction::Pop
            }
            Opcode::CallFunc => {
                let ops = Operands::new(operands, 1, 1)?;
                Instruction::CallFunc {
                    function: ops.string(0)?,
                }
            }
            Opcode::PushVariable => {
                let ops = Operands::new(operands, 1, 1)?;
                Instruction::PushVariable {
                    variable: ops.string(0)?,
                }
            }
            Opcode::StoreVariable => {
                let ops = Operands::new(operands, 1, 1)?;
                Instruction::StoreVariable {
                    variable: ops.string(0)?,
                }
            }
            Opcode::Stop => {
                Operands::new(operands, 0, 0)?;
                Instruction::Stop
            }
            Opcode::RunNode => {
                Operands::new(operands, 0, 0)?;
                Instruction::RunNode
            }
        };
        Ok(instruction)
    }

    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::JumpTo { .. } => Opcode::JumpTo,
            Instruction::Jump => Opcode::Jump,
            Instruction::RunLine { .. } => Opcode::RunLine,
            Instruction::RunCommand { .. } => Opcode::RunCommand,
            Instruction::AddOption { .. } => Opcode::AddOption,
            Instruction::ShowOptions => Opcode::ShowOptions,
            Instruction::PushString { .. } => Opcode::PushString,
            Instruction::PushFloat { .. } => Opcode::PushFloat,
            Instruction::PushBool { .. } => Opcode::PushBool,
            Instruction::PushNull => Opcode::PushNull,
            Instruction::JumpIfFalse { .. } => Opcode::JumpIfFalse,
            Instruction::Pop => Opcode::Pop,
            Instruction::CallFunc { .. } => Opcode::CallFunc,
            Instruction::PushVariable { .. } => Opcode::PushVariable,
            Instruction::StoreVariable { .. } => Opcode::StoreVariable,
            Instruction::Stop => Opcode::Stop,
            Instruction::RunNode => Opcode::RunNode,
        }
    }
}

/// One named dialogue block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub instructions: Vec<Instruction>,
    /// Label name -> instruction index; an index equal to the instruction
    /// count marks the end of the node
    pub labels: IndexMap<String, usize>,
}

impl Node {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Node {
            instructions,
            labels: IndexMap::new(),
        }
    }

    pub fn with_label(mut self, name: &str, index: usize) -> Self {
        self.labels.insert(name.to_string(), index);
        self
    }

    /// Check every label lands inside the node (or on its end)
    pub fn validate(&self, node_name: &str) -> Result<(), ConvertError> {
        let len = self.instructions.len();
        for (label, &index) in &self.labels {
            if index > len {
                return Err(ConvertError::DanglingLabel {
                    node: node_name.to_string(),
                    label: label.clone(),
                    index,
                    len,
                });
            }
        }
        Ok(())
    }

    /// Instruction index -> labels placed before it, names in lexical order
    pub fn labels_by_index(&self) -> BTreeMap<usize, Vec<&str>> {
        let mut by_index: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
        for (label, &index) in &self.labels {
            by_index.entry(index).or_default().push(label.as_str());
        }
        for labels in by_index.values_mut() {
            labels.sort_unstable();
        }
        by_index
    }
}

/// Nodes in the order the compiler produced them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub nodes: IndexMap<String, Node>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, name: &str, node: Node) {
        self.nodes.insert(name.to_string(), node);
    }

    pub fn instruction_count(&self) -> usize {
        self.nodes.values().map(|n| n.instructions.len()).sum()
    }
}

/// A string table entry. Only `text` reaches the assembly output; the rest
/// is provenance recorded by the compiler.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StringInfo {
    pub text: String,
    #[serde(default)]
    pub node: Option<String>,
    #[serde(default)]
    pub line_number: Option<u32>,
    #[serde(default)]
    pub file: Option<String>,
}

impl StringInfo {
    pub fn new(text: &str) -> Self {
        StringInfo {
            text: text.to_string(),
            node: None,
            line_number: None,
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct StringTable {
    entries: IndexMap<String, StringInfo>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: &str, info: StringInfo) {
        self.entries.insert(id.to_string(), info);
    }

    pub fn get(&self, id: &str) -> Option<&StringInfo> {
        self.entries.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StringInfo)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Opcode as written by the compiler: its ordinal or its name
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawOpcode {
    Ordinal(i64),
    Name(String),
}

impl RawOpcode {
    pub fn resolve(&self) -> Option<Opcode> {
        match self {
            RawOpcode::Ordinal(n) => Opcode::from_ordinal(*n),
            RawOpcode::Name(name) => name.parse().ok(),
        }
    }
}

impl fmt::Display for RawOpcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RawOpcode::Ordinal(n) => write!(f, "{}", n),
            RawOpcode::Name(name) => write!(f, "'{}'", name),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawInstruction {
    pub opcode: RawOpcode,
    #[serde(default)]
    pub operands: Vec<Operand>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNode {
    #[serde(default)]
    pub instructions: Vec<RawInstruction>,
    #[serde(default)]
    pub labels: IndexMap<String, usize>,
}

impl RawNode {
    fn decode(self, node_name: &str) -> Result<Node, ConvertError> {
        let mut instructions = Vec::with_capacity(self.instructions.len());

        for (index, raw) in self.instructions.iter().enumerate() {
            let opcode = raw
                .opcode
                .resolve()
                .ok_or_else(|| ConvertError::UnknownOpcode {
                    node: node_name.to_string(),
                    index,
                    opcode: raw.opcode.to_string(),
                })?;

            let instruction = Instruction::decode(opcode, &raw.operands)
                .map_err(|e| e.in_context(node_name, index, opcode))?;
            instructions.push(instruction);
        }

        let node = Node {
            instructions,
            labels: self.labels,
        };
        node.validate(node_name)?;
        Ok(node)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProgram {
    #[serde(default)]
    pub nodes: IndexMap<String, RawNode>,
}

/// Everything the Yarn compiler hands over for one script
#[derive(Debug, Clone, Deserialize)]
pub struct CompiledScript {
    /// Compiler messages; the only content when compilation failed
    #[serde(default)]
    pub diagnostics: Vec<String>,
    #[serde(default)]
    pub strings: StringTable,
    /// Absent when compilation failed
    pub program: Option<RawProgram>,
}

impl CompiledScript {
    pub fn from_toml(source: &str) -> Result<Self, ConvertError> {
        Ok(toml::from_str(source)?)
    }

    /// Check the producer contract and split into the typed program and
    /// its string table
    pub fn into_parts(self) -> Result<(Program, StringTable), ConvertError> {
        let raw_program = self
            .program
            .ok_or(ConvertError::CompileFailed(self.diagnostics))?;

        let mut program = Program::new();
        for (name, raw_node) in raw_program.nodes {
            let node = raw_node.decode(&name)?;
            debug!(
                "Loaded node '{}': {} instructions, {} labels",
                name,
                node.instructions.len(),
                node.labels.len()
            );
            program.nodes.insert(name, node);
        }

        Ok((program, self.strings))
    }
}
