// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Pretty printers for reporting information.
use std::{
    borrow::Cow,
    sync::{Mutex, MutexGuard, PoisonError},
};

const VERTICAL: char = '│';
const UP_AND_RIGHT: char = '└';
const VERTICAL_AND_RIGHT: char = '├';

lazy_static::lazy_static! {
    static ref WARNING_PRINTER: Mutex<WarningPrinter> = Mutex::new(WarningPrinter::new());
}

/// The symbol leading a line of a block, so that blocks read like a tree.
fn tree_symbol(i_line: usize, last_line: bool, last_block: bool) -> char {
    match (i_line, last_line, last_block) {
        (0, false, _) => VERTICAL_AND_RIGHT,
        (0, _, false) => VERTICAL_AND_RIGHT,
        (0, true, true) => UP_AND_RIGHT,
        _ => VERTICAL,
    }
}

pub(crate) struct InfoPrinter {
    title: Cow<'static, str>,
    blocks: Vec<Vec<Cow<'static, str>>>,
}

impl InfoPrinter {
    pub(crate) fn new(title: Cow<'static, str>) -> Self {
        Self {
            title,
            blocks: vec![],
        }
    }

    pub(crate) fn push_line(&mut self, line: Cow<'static, str>) {
        self.blocks.push(vec![line]);
    }

    pub(crate) fn push_block(&mut self, block: Vec<Cow<'static, str>>) {
        self.blocks.push(block);
    }

    pub(crate) fn display(self) {
        log::info!("{}", console::style(self.title).bold());
        let num_blocks = self.blocks.len();
        for (i_block, block) in self.blocks.into_iter().enumerate() {
            let num_lines = block.len();
            for (i_line, line) in block.into_iter().enumerate() {
                let symbol = tree_symbol(i_line, i_line + 1 == num_lines, i_block + 1 == num_blocks);
                log::info!("{symbol} {line}");
            }
        }
        log::info!("");
    }
}

struct WarningPrinter {
    blocks: Vec<Vec<Cow<'static, str>>>,
}

impl WarningPrinter {
    fn new() -> Self {
        Self { blocks: vec![] }
    }

    fn push_line(&mut self, line: Cow<'static, str>) {
        self.blocks.push(vec![line]);
    }

    fn display(&mut self) {
        log::debug!("Displaying warnings");
        if self.blocks.is_empty() {
            return;
        }

        log::warn!("{}", console::style("Warnings").bold());
        let num_blocks = self.blocks.len();
        for (i_block, block) in self.blocks.iter().enumerate() {
            let num_lines = block.len();
            for (i_line, line) in block.iter().enumerate() {
                let symbol = tree_symbol(i_line, i_line + 1 == num_lines, i_block + 1 == num_blocks);
                log::warn!("{symbol} {line}");
            }
        }
        log::warn!("");
        self.blocks.clear();
    }
}

pub(crate) trait Warn {
    fn warn(self);
}

/// Lock a warning printer. A panic while it was held doesn't lose the warnings
/// collected so far.
fn lock(printer: &Mutex<WarningPrinter>) -> MutexGuard<'_, WarningPrinter> {
    printer.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Warn for &'static str {
    fn warn(self) {
        lock(&WARNING_PRINTER).push_line(self.into());
    }
}

impl Warn for String {
    fn warn(self) {
        lock(&WARNING_PRINTER).push_line(self.into());
    }
}

/// Print out any warnings that have been collected as CLI arguments have been
/// parsed. This should only be called once all arguments have been parsed into
/// parameters.
pub(crate) fn display_warnings() {
    lock(&WARNING_PRINTER).display();
}
