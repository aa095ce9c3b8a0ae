// Yarn instruction emission for AsmCodeGen
//
// One assembler macro line per instruction. String-table keys are referenced
// as immediates (`#label`), jump targets and symbols as plain labels.

use std::fmt::Write;

use log::trace;

use crate::luminary::codegen::AsmCodeGen;
use crate::luminary::error::ConvertError;
use crate::luminary::program::Instruction;

impl AsmCodeGen {
    /// Append the macro line for a single instruction
    pub fn emit_instruction(&mut self, instruction: &Instruction) -> Result<(), ConvertError> {
        let mnemonic = instruction.opcode().mnemonic();

        match instruction {
            Instruction::JumpTo { label } | Instruction::JumpIfFalse { label } => {
                let target = self.label(label);
                writeln!(self.output, "\t{} {}", mnemonic, target)?;
            }
            Instruction::RunLine { string_id, .. } | Instruction::PushString { string_id } => {
                let string = self.label(string_id);
                writeln!(self.output, "\t{} #{}", mnemonic, string)?;
            }
            // Commands are passed through untouched, the runtime parses them
            Instruction::RunCommand { command, .. } => {
                writeln!(self.output, "\t{} {}", mnemonic, command)?;
            }
            Instruction::AddOption {
                string_id,
                destination,
                ..
            } => {
                let string = self.label(string_id);
                let target = self.label(destination);
                writeln!(self.output, "\t{} #{}, #{}", mnemonic, string, target)?;
            }
            Instruction::PushFloat { value } => {
                writeln!(self.output, "\t{} {}", mnemonic, truncate_number(*value))?;
            }
            Instruction::PushBool { value } => {
                writeln!(self.output, "\t{} {}", mnemonic, if *value { 1 } else { 0 })?;
            }
            Instruction::CallFunc { function } => {
                let symbol = self.label(function);
                writeln!(self.output, "\t{} {}", mnemonic, symbol)?;
            }
            Instruction::PushVariable { variable } | Instruction::StoreVariable { variable } => {
                let symbol = self.label(variable);
                writeln!(self.output, "\t{} {}", mnemonic, symbol)?;
            }
            // Operands for these come off the runtime stack
            Instruction::Jump
            | Instruction::ShowOptions
            | Instruction::PushNull
            | Instruction::Pop
            | Instruction::Stop
            | Instruction::RunNode => {
                writeln!(self.output, "\t{}", mnemonic)?;
            }
        }

        trace!("Emitted {:?}", instruction);
        Ok(())
    }
}

/// Numbers are integers on the target: drop the fraction, rounding toward zero.
/// Out of range values saturate.
pub fn truncate_number(value: f32) -> i32 {
    value.trunc() as i32
}
