//! Lazy pickle production.

use std::iter::FusedIterator;

use crate::ast::{
    Background, Examples, Feature, FeatureChild, GherkinDocument, Rule, RuleChild, Scenario, Step,
    StepArgument, TableRow,
};
use crate::ids::IdGenerator;

use super::placeholder::ExampleValues;
use super::{Pickle, PickleStep, PickleStepArgument, PickleTag};

const PICKLE_ID_PREFIX: &str = "pickle-";

#[derive(Debug, Clone, Copy)]
struct RuleCursor<'doc> {
    rule: &'doc Rule,
    next_child: usize,
    background: Option<&'doc Background>,
}

#[derive(Debug, Clone, Copy)]
struct OutlineCursor<'doc> {
    scenario: &'doc Scenario,
    rule: Option<&'doc Rule>,
    backgrounds: [Option<&'doc Background>; 2],
    examples: usize,
    row: usize,
}

impl<'doc> OutlineCursor<'doc> {
    /// Move to the next body row of a headed Examples block.
    fn advance(&mut self) -> Option<(&'doc Examples, &'doc TableRow, &'doc TableRow)> {
        while let Some(examples) = self.scenario.examples.get(self.examples) {
            let next = examples
                .header
                .as_ref()
                .and_then(|header| examples.body.get(self.row).map(|row| (header, row)));
            if let Some((header, row)) = next {
                self.row += 1;
                return Some((examples, header, row));
            }
            self.examples += 1;
            self.row = 0;
        }
        None
    }
}

/// Iterator yielding the pickles of one document in source order.
///
/// The stream holds only cursors into the borrowed AST, so an outline with
/// any number of Examples rows is expanded one pickle per call to
/// [`Iterator::next`]. It is single-pass: each call advances the cursor and
/// there is no way to rewind. Create another stream over the same document
/// for an independent pass; it yields an identical sequence.
///
/// # Examples
/// ```
/// use picklery_gherkin::{ParseOptions, PickleStream, parse};
///
/// let source = "Feature: F\n  Scenario: S\n    Given a step\n";
/// let document = parse(source, &ParseOptions::new("f.feature")).expect("valid feature");
/// let mut pickles = PickleStream::new(&document);
/// assert_eq!(pickles.next().map(|p| p.name), Some("S".to_owned()));
/// assert!(pickles.next().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct PickleStream<'doc> {
    uri: &'doc str,
    feature: Option<&'doc Feature>,
    ids: IdGenerator,
    next_child: usize,
    background: Option<&'doc Background>,
    rule: Option<RuleCursor<'doc>>,
    outline: Option<OutlineCursor<'doc>>,
}

impl<'doc> PickleStream<'doc> {
    /// Start a pass over `document`.
    #[must_use]
    pub fn new(document: &'doc GherkinDocument) -> Self {
        Self {
            uri: &document.uri,
            feature: document.feature.as_ref(),
            ids: IdGenerator::with_prefix(PICKLE_ID_PREFIX),
            next_child: 0,
            background: None,
            rule: None,
            outline: None,
        }
    }

    /// Emit a plain scenario's pickle, or arm the outline cursor and emit
    /// nothing yet.
    fn enter_scenario(
        &mut self,
        scenario: &'doc Scenario,
        rule: Option<&'doc Rule>,
        backgrounds: [Option<&'doc Background>; 2],
    ) -> Option<Pickle> {
        if scenario.is_outline() {
            self.outline = Some(OutlineCursor {
                scenario,
                rule,
                backgrounds,
                examples: 0,
                row: 0,
            });
            return None;
        }
        let mut steps = self.background_steps(backgrounds);
        for step in &scenario.steps {
            steps.push(self.pickle_step(step, None));
        }
        Some(Pickle {
            id: self.ids.next_id(),
            uri: self.uri.to_owned(),
            location: scenario.location,
            name: scenario.name.clone(),
            language: self.language(),
            tags: self.tags(rule, scenario, None),
            steps,
            ast_node_ids: vec![scenario.id.clone()],
        })
    }

    fn outline_pickle(
        &mut self,
        cursor: OutlineCursor<'doc>,
        examples: &'doc Examples,
        header: &'doc TableRow,
        row: &'doc TableRow,
    ) -> Pickle {
        let scenario = cursor.scenario;
        let values = ExampleValues::new(header, row);
        let mut steps = self.background_steps(cursor.backgrounds);
        for step in &scenario.steps {
            steps.push(self.pickle_step(step, Some((&values, row))));
        }
        Pickle {
            id: self.ids.next_id(),
            uri: self.uri.to_owned(),
            location: row.location,
            name: values.substitute(&scenario.name),
            language: self.language(),
            tags: self.tags(cursor.rule, scenario, Some(examples)),
            steps,
            ast_node_ids: vec![scenario.id.clone(), row.id.clone()],
        }
    }

    fn background_steps(&mut self, backgrounds: [Option<&'doc Background>; 2]) -> Vec<PickleStep> {
        let mut steps = Vec::new();
        for background in backgrounds.into_iter().flatten() {
            for step in &background.steps {
                steps.push(self.pickle_step(step, None));
            }
        }
        steps
    }

    fn pickle_step(
        &mut self,
        step: &Step,
        example: Option<(&ExampleValues<'doc>, &TableRow)>,
    ) -> PickleStep {
        let apply = |text: &str| {
            example.map_or_else(|| text.to_owned(), |(values, _)| values.substitute(text))
        };
        let argument = step.argument.as_ref().map(|argument| match argument {
            StepArgument::DocString(doc) => PickleStepArgument::DocString {
                content: apply(&doc.content),
                media_type: doc.media_type.as_deref().map(apply),
            },
            StepArgument::DataTable(table) => PickleStepArgument::DataTable {
                rows: table
                    .rows
                    .iter()
                    .map(|row| row.cells.iter().map(|cell| apply(&cell.value)).collect())
                    .collect(),
            },
        });
        let mut ast_node_ids = vec![step.id.clone()];
        if let Some((_, row)) = example {
            ast_node_ids.push(row.id.clone());
        }
        PickleStep {
            id: self.ids.next_id(),
            text: apply(&step.text),
            step_type: step.keyword_type.into(),
            argument,
            ast_node_ids,
        }
    }

    fn language(&self) -> String {
        self.feature
            .map(|feature| feature.language.clone())
            .unwrap_or_default()
    }

    /// Tags in inheritance order: feature, rule, scenario, examples.
    fn tags(
        &self,
        rule: Option<&'doc Rule>,
        scenario: &'doc Scenario,
        examples: Option<&'doc Examples>,
    ) -> Vec<PickleTag> {
        let feature_tags = self.feature.map(|f| f.tags.as_slice()).unwrap_or_default();
        let rule_tags = rule.map(|r| r.tags.as_slice()).unwrap_or_default();
        let examples_tags = examples.map(|e| e.tags.as_slice()).unwrap_or_default();
        feature_tags
            .iter()
            .chain(rule_tags)
            .chain(&scenario.tags)
            .chain(examples_tags)
            .map(|tag| PickleTag {
                name: tag.name.clone(),
                ast_node_id: tag.id.clone(),
            })
            .collect()
    }
}

impl Iterator for PickleStream<'_> {
    type Item = Pickle;

    fn next(&mut self) -> Option<Pickle> {
        loop {
            if let Some(mut cursor) = self.outline {
                if let Some((examples, header, row)) = cursor.advance() {
                    self.outline = Some(cursor);
                    return Some(self.outline_pickle(cursor, examples, header, row));
                }
                self.outline = None;
            }

            if let Some(mut cursor) = self.rule {
                let Some(child) = cursor.rule.children.get(cursor.next_child) else {
                    self.rule = None;
                    continue;
                };
                cursor.next_child += 1;
                match child {
                    RuleChild::Background(background) => {
                        cursor.background = Some(background);
                        self.rule = Some(cursor);
                    }
                    RuleChild::Scenario(scenario) => {
                        self.rule = Some(cursor);
                        let backgrounds = [self.background, cursor.background];
                        if let Some(pickle) =
                            self.enter_scenario(scenario, Some(cursor.rule), backgrounds)
                        {
                            return Some(pickle);
                        }
                    }
                }
                continue;
            }

            let child = self.feature?.children.get(self.next_child)?;
            self.next_child += 1;
            match child {
                FeatureChild::Background(background) => self.background = Some(background),
                FeatureChild::Scenario(scenario) => {
                    if let Some(pickle) = self.enter_scenario(scenario, None, [self.background, None])
                    {
                        return Some(pickle);
                    }
                }
                FeatureChild::Rule(rule) => {
                    self.rule = Some(RuleCursor {
                        rule,
                        next_child: 0,
                        background: None,
                    });
                }
            }
        }
    }
}

impl FusedIterator for PickleStream<'_> {}
