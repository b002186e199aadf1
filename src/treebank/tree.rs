// Copyright 2019 Guillaume Becquin
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::SstError;
use crate::labels::fine_label;
use itertools::Itertools;
use std::str::FromStr;

/// # Labeled parse tree
/// Binarized constituency tree of a treebank sentence. Every node carries its own fine-grained
/// sentiment label; leaves carry a single word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledTree {
    label: u8,
    word: Option<String>,
    children: Vec<LabeledTree>,
}

impl LabeledTree {
    /// Creates a leaf holding a single word
    pub fn leaf(label: u8, word: &str) -> Self {
        LabeledTree {
            label,
            word: Some(word.to_owned()),
            children: vec![],
        }
    }

    /// Creates an inner node spanning its children
    pub fn node(label: u8, children: Vec<LabeledTree>) -> Self {
        LabeledTree {
            label,
            word: None,
            children,
        }
    }

    pub fn label(&self) -> u8 {
        self.label
    }

    pub fn children(&self) -> &[LabeledTree] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Words spanned by this node, left to right
    pub fn words(&self) -> Vec<&str> {
        let mut words = Vec::new();
        self.collect_words(&mut words);
        words
    }

    fn collect_words<'a>(&'a self, words: &mut Vec<&'a str>) {
        if let Some(word) = &self.word {
            words.push(word.as_str());
        }
        for child in self.children.iter() {
            child.collect_words(words);
        }
    }

    /// Text spanned by this node (words joined by a single space). For a root node this is
    /// the full sentence.
    pub fn to_line(&self) -> String {
        self.words().iter().join(" ")
    }

    /// Returns every node of the tree paired with its label and text, in pre-order (the node
    /// itself first, then its children from left to right).
    pub fn to_labeled_lines(&self) -> Vec<(u8, String)> {
        let mut lines = Vec::with_capacity(self.num_nodes());
        self.collect_labeled_lines(&mut lines);
        lines
    }

    fn collect_labeled_lines(&self, lines: &mut Vec<(u8, String)>) {
        lines.push((self.label, self.to_line()));
        for child in self.children.iter() {
            child.collect_labeled_lines(lines);
        }
    }

    pub fn num_nodes(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| child.num_nodes())
            .sum::<usize>()
    }

    /// Parses a tree in PTB bracketed notation, e.g. `(3 (2 It) (4 (2 is) (4 great)))`.
    ///
    /// # Parameters
    /// - text (`&str`): bracketed tree
    /// - line (`usize`): line number reported in parsing errors
    ///
    /// # Returns
    /// - `Result<LabeledTree, SstError>` with the parsed tree
    pub fn parse(text: &str, line: usize) -> Result<LabeledTree, SstError> {
        let mut parser = TreeParser::new(text, line);
        let tree = parser.parse_node()?;
        parser.skip_whitespace();
        if parser.peek().is_some() {
            return Err(parser.error("unexpected content after the end of the tree"));
        }
        Ok(tree)
    }
}

impl FromStr for LabeledTree {
    type Err = SstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LabeledTree::parse(s, 1)
    }
}

struct TreeParser {
    chars: Vec<char>,
    position: usize,
    line: usize,
}

impl TreeParser {
    fn new(text: &str, line: usize) -> Self {
        TreeParser {
            chars: text.chars().collect(),
            position: 0,
            line,
        }
    }

    fn error(&self, message: &str) -> SstError {
        SstError::TreeParse {
            line: self.line,
            position: self.position,
            message: message.to_owned(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().map_or(false, char::is_whitespace) {
            self.position += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), SstError> {
        match self.peek() {
            Some(character) if character == expected => {
                self.position += 1;
                Ok(())
            }
            Some(character) => Err(self.error(&format!(
                "expected `{}`, found `{}`",
                expected, character
            ))),
            None => Err(self.error(&format!("expected `{}`, found end of input", expected))),
        }
    }

    fn read_atom(&mut self) -> String {
        let start = self.position;
        while self
            .peek()
            .map_or(false, |c| !c.is_whitespace() && c != '(' && c != ')')
        {
            self.position += 1;
        }
        self.chars[start..self.position].iter().collect()
    }

    fn parse_label(&mut self) -> Result<u8, SstError> {
        let start = self.position;
        let atom = self.read_atom();
        let value = atom.parse::<i64>().map_err(|_| SstError::TreeParse {
            line: self.line,
            position: start,
            message: format!("invalid label `{}`", atom),
        })?;
        fine_label(value)
    }

    fn parse_node(&mut self) -> Result<LabeledTree, SstError> {
        self.skip_whitespace();
        self.expect('(')?;
        self.skip_whitespace();
        let label = self.parse_label()?;
        self.skip_whitespace();

        let tree = match self.peek() {
            Some('(') => {
                let mut children = Vec::new();
                while self.peek() == Some('(') {
                    children.push(self.parse_node()?);
                    self.skip_whitespace();
                }
                LabeledTree::node(label, children)
            }
            Some(')') | None => return Err(self.error("node has neither a word nor children")),
            Some(_) => {
                let word = self.read_atom();
                self.skip_whitespace();
                LabeledTree::leaf(label, &word)
            }
        };
        self.expect(')')?;
        Ok(tree)
    }
}
