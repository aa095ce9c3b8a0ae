//! Yarn Opcode Table
//!
//! Names every stack-machine operation a compiled Yarn program can contain,
//! together with the Luminary assembler macro that implements it.
//!
//! # Ordinal numbering
//!
//! Compiled programs refer to opcodes by their position in the Yarn
//! enumeration. `Opcode::from_ordinal` is the only place that numbering is
//! interpreted; everything downstream matches on the variant.
//!
//! | Ordinal | Opcode        | Macro                |
//! |---------|---------------|----------------------|
//! | 0       | JumpTo        | `YARN_JUMPTO`        |
//! | 1       | Jump          | `YARN_JUMP`          |
//! | 2       | RunLine       | `YARN_RUNLINE`       |
//! | 3       | RunCommand    | `YARN_RUNCOMMAND`    |
//! | 4       | AddOption     | `YARN_ADDOPTION`     |
//! | 5       | ShowOptions   | `YARN_SHOWOPTIONS`   |
//! | 6       | PushString    | `YARN_PUSHSTRING`    |
//! | 7       | PushFloat     | `YARN_PUSHNUMBER`    |
//! | 8       | PushBool      | `YARN_PUSHBOOL`      |
//! | 9       | PushNull      | `YARN_PUSHNULL`      |
//! | 10      | JumpIfFalse   | `YARN_JUMPIFFALSE`   |
//! | 11      | Pop           | `YARN_POP`           |
//! | 12      | CallFunc      | `YARN_CALLFUNC`      |
//! | 13      | PushVariable  | `YARN_PUSHVARIABLE`  |
//! | 14      | StoreVariable | `YARN_STOREVARIABLE` |
//! | 15      | Stop          | `YARN_STOP`          |
//! | 16      | RunNode       | `YARN_RUNNODE`       |

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Jumps to a named position in the node.
    JumpTo,
    /// Peeks a label name from the stack and jumps to it.
    Jump,
    /// Delivers a string ID to the client.
    RunLine,
    /// Delivers a command to the client.
    RunCommand,
    /// Adds an entry to the option list.
    AddOption,
    /// Presents the option list; the selection is left on the stack.
    ShowOptions,
    PushString,
    PushFloat,
    PushBool,
    PushNull,
    /// Jumps to a named position if the top of the stack is false.
    JumpIfFalse,
    Pop,
    CallFunc,
    PushVariable,
    StoreVariable,
    Stop,
    /// Runs the node whose name is on top of the stack.
    RunNode,
}

impl Opcode {
    /// All opcodes in ordinal order
    pub const ALL: [Opcode; 17] = [
        Opcode::JumpTo,
        Opcode::Jump,
        Opcode::RunLine,
        Opcode::RunCommand,
        Opcode::AddOption,
        Opcode::ShowOptions,
        Opcode::PushString,
        Opcode::PushFloat,
        Opcode::PushBool,
        Opcode::PushNull,
        Opcode::JumpIfFalse,
        Opcode::Pop,
        Opcode::CallFunc,
        Opcode::PushVariable,
        Opcode::StoreVariable,
        Opcode::Stop,
        Opcode::RunNode,
    ];

    /// Decode a producer ordinal, `None` when outside the enumeration
    pub fn from_ordinal(ordinal: i64) -> Option<Opcode> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Opcode::JumpTo => "JumpTo",
            Opcode::Jump => "Jump",
            Opcode::RunLine => "RunLine",
            Opcode::RunCommand => "RunCommand",
            Opcode::AddOption => "AddOption",
            Opcode::ShowOptions => "ShowOptions",
            Opcode::PushString => "PushString",
            Opcode::PushFloat => "PushFloat",
            Opcode::PushBool => "PushBool",
            Opcode::PushNull => "PushNull",
            Opcode::JumpIfFalse => "JumpIfFalse",
            Opcode::Pop => "Pop",
            Opcode::CallFunc => "CallFunc",
            Opcode::PushVariable => "PushVariable",
            Opcode::StoreVariable => "StoreVariable",
            Opcode::Stop => "Stop",
            Opcode::RunNode => "RunNode",
        }
    }

    /// Assembler macro understood by the Luminary Yarn runtime
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::JumpTo => "YARN_JUMPTO",
            Opcode::Jump => "YARN_JUMP",
            Opcode::RunLine => "YARN_RUNLINE",
            Opcode::RunCommand => "YARN_RUNCOMMAND",
            Opcode::AddOption => "YARN_ADDOPTION",
            Opcode::ShowOptions => "YARN_SHOWOPTIONS",
            Opcode::PushString => "YARN_PUSHSTRING",
            // The runtime only has integer numbers
            Opcode::PushFloat => "YARN_PUSHNUMBER",
            Opcode::PushBool => "YARN_PUSHBOOL",
            Opcode::PushNull => "YARN_PUSHNULL",
            Opcode::JumpIfFalse => "YARN_JUMPIFFALSE",
            Opcode::Pop => "YARN_POP",
            Opcode::CallFunc => "YARN_CALLFUNC",
            Opcode::PushVariable => "YARN_PUSHVARIABLE",
            Opcode::StoreVariable => "YARN_STOREVARIABLE",
            Opcode::Stop => "YARN_STOP",
            Opcode::RunNode => "YARN_RUNNODE",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Opcode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|opcode| opcode.name() == s)
            .ok_or(())
    }
}
