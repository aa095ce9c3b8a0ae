// Luminary Assembly Code Generator
//
// Renders a compiled Yarn program as a 68000 assembler listing for the
// Luminary engine. Section order is fixed:
//
//   banner
//   string table (dc.b declarations, then `even`)
//   one label per node, its instructions with local @labels, then `rts`
//
// The listing is built in memory; nothing is written until generation
// succeeded.

use std::fmt::Write;

use log::{debug, info};

use crate::luminary::error::ConvertError;
use crate::luminary::program::{Node, Program, StringTable};
use crate::luminary::sanitise;

/// Banner comment at the top of the listing
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub tool_name: String,
    pub date: String,
    pub source: String,
}

impl Banner {
    /// Header text; the trailing space widens the `=` rules by one column,
    /// as existing Luminary listings have them
    pub fn header(&self) -> String {
        format!(
            "Generated with {} on {} from {} ",
            self.tool_name, self.date, self.source
        )
    }
}

pub struct AsmCodeGen {
    /// Scope prefix for every generated label
    pub program_name: String,
    pub(crate) output: String,
}

impl AsmCodeGen {
    pub fn new(program_name: &str) -> Self {
        AsmCodeGen {
            program_name: program_name.to_string(),
            output: String::new(),
        }
    }

    /// Label for `raw_name` in this program's scope
    pub fn label(&self, raw_name: &str) -> String {
        sanitise::generate_label(&self.program_name, raw_name)
    }

    /// Produce the complete listing
    pub fn generate(
        mut self,
        program: &Program,
        strings: &StringTable,
        banner: &Banner,
    ) -> Result<String, ConvertError> {
        // Nothing is rendered for a program that breaks the label invariant
        for (name, node) in &program.nodes {
            node.validate(name)?;
        }

        info!(
            "Generating '{}': {} nodes, {} instructions, {} strings",
            self.program_name,
            program.nodes.len(),
            program.instruction_count(),
            strings.len()
        );

        self.emit_banner(banner)?;
        self.emit_string_table(strings)?;

        writeln!(self.output, "; Programs")?;
        for (name, node) in &program.nodes {
            self.emit_node(name, node)?;
        }

        debug!("Generated {} bytes of assembly", self.output.len());
        Ok(self.output)
    }

    fn emit_banner(&mut self, banner: &Banner) -> Result<(), ConvertError> {
        let header = banner.header();
        let rule = "=".repeat(header.len());

        writeln!(self.output, "; {}", rule)?;
        writeln!(self.output, "; {}", header)?;
        writeln!(self.output, "; {}", rule)?;
        writeln!(self.output)?;
        Ok(())
    }

    fn emit_node(&mut self, name: &str, node: &Node) -> Result<(), ConvertError> {
        let node_label = self.label(name);
        writeln!(self.output, "{}:", node_label)?;

        let labels = node.labels_by_index();

        for (index, instruction) in node.instructions.iter().enumerate() {
            if let Some(names) = labels.get(&index) {
                self.emit_local_labels(names)?;
            }
            self.emit_instruction(instruction)?;
        }

        // Labels pointing just past the last instruction
        if let Some(names) = labels.get(&node.instructions.len()) {
            self.emit_local_labels(names)?;
        }

        writeln!(self.output, "\trts")?;
        writeln!(self.output)?;

        debug!(
            "Node '{}' -> {} ({} instructions)",
            name,
            node_label,
            node.instructions.len()
        );
        Ok(())
    }

    // Local labels keep their raw names, scoped by the enclosing node label
    fn emit_local_labels(&mut self, names: &[&str]) -> Result<(), ConvertError> {
        for name in names {
            writeln!(self.output, "\t@{}:", name)?;
        }
        Ok(())
    }
}
