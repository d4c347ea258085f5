use std::{ops::Range, rc::Rc};

use tracing::trace;

use crate::{
    error::LexError,
    interpreter::lexer::{
        core::{LexResult, Lexer, LoopKind, PendingLoops},
        tag::Tag,
        token::{Position, Token},
    },
};

impl LoopKind {
    const fn command(self) -> &'static str {
        match self {
            Self::Sum => "\\sum",
            Self::Product => "\\prod",
        }
    }

    const fn loop_tag(self) -> Tag {
        match self {
            Self::Sum => Tag::Sum,
            Self::Product => Tag::Product,
        }
    }

    const fn operator(self) -> Tag {
        match self {
            Self::Sum => Tag::Add,
            Self::Product => Tag::Mul,
        }
    }

    const fn identity(self) -> &'static str {
        match self {
            Self::Sum => "0",
            Self::Product => "1",
        }
    }
}

impl Lexer<'_> {
    /// Lexes the content of an attribute on its own and strips the final
    /// [`Tag::None`].
    fn lex_fragment(&self, range: Range<usize>) -> LexResult<Vec<Token>> {
        let mut tokens = Lexer::fragment(self.source, range, Rc::clone(&self.lines)).tokenize()?;
        tokens.pop();
        Ok(tokens)
    }

    /// Expands `\sum_{i=lo}^{hi}` or `\prod_{i=lo}^{hi}` into
    ///
    /// ```text
    /// \begin{block} acc := 0  i := lo
    ///   SUM { i \leq hi } \begin{block} acc := acc + (
    /// ```
    ///
    /// and records the accumulator and iterator so that the end of the line
    /// can emit the matching close.
    pub(super) fn open_loop(&mut self, kind: LoopKind, command: &str, start: Position) -> LexResult<Vec<Token>> {
        let malformed = |details: &str| LexError::MalformedBounds { command: command.to_string(),
                                                                    details: details.to_string(),
                                                                    coord:   start.coord, };

        let pending = match (self.loops, kind) {
            (PendingLoops::Idle, _) => 0,
            (PendingLoops::AwaitingSumClose(n), LoopKind::Sum)
            | (PendingLoops::AwaitingProductClose(n), LoopKind::Product) => n,
            (PendingLoops::AwaitingSumClose(_), LoopKind::Product)
            | (PendingLoops::AwaitingProductClose(_), LoopKind::Sum) => {
                let pending = if kind == LoopKind::Sum { LoopKind::Product } else { LoopKind::Sum };
                return Err(LexError::MixedLoopNesting { command: command.to_string(),
                                                        pending: pending.command().to_string(),
                                                        coord:   start.coord, });
            },
        };

        if !self.eat('_') {
            return Err(malformed("expected _{variable=lower}"));
        }
        let lower = self.attribute(command)?;
        self.eat('^');
        let upper = self.attribute(command)?;
        let end = self.position(upper.end);

        let mut lower_tokens = self.lex_fragment(lower.start + 1..lower.end - 1)?.into_iter();
        let iterator = match (lower_tokens.next(), lower_tokens.next()) {
            (Some(var), Some(op)) if var.tag == Tag::Ident && matches!(op.tag, Tag::Eq | Tag::Set) => var,
            _ => return Err(malformed("lower bound must read variable = value")),
        };
        let lower_tokens: Vec<Token> = lower_tokens.collect();
        let upper_tokens = self.lex_fragment(upper.start + 1..upper.end - 1)?;
        if lower_tokens.is_empty() || upper_tokens.is_empty() {
            return Err(malformed("empty bound"));
        }

        let name = match kind {
            LoopKind::Sum => format!("_sum{}", start.offset),
            LoopKind::Product => format!("_prod{}", start.offset),
        };
        let synth = |tag: Tag, raw: &str| Token::new(tag, start, end, raw);
        let accumulator = synth(Tag::Ident, &name);
        let var = |t: &Token| Token::new(Tag::Ident, start, end, t.raw.clone());

        let mut tokens = vec![synth(Tag::BeginB, "\\begin{block}"),
                              accumulator.clone(),
                              synth(Tag::Set, ":="),
                              synth(Tag::Number, kind.identity()),
                              var(&iterator),
                              synth(Tag::Set, ":=")];
        tokens.extend(lower_tokens);
        tokens.extend([synth(kind.loop_tag(), &name),
                       synth(Tag::LBrace, "{"),
                       var(&iterator),
                       synth(Tag::Leq, "\\leq")]);
        tokens.extend(upper_tokens);
        tokens.extend([synth(Tag::RBrace, "}"),
                       synth(Tag::BeginB, "\\begin{block}"),
                       accumulator.clone(),
                       synth(Tag::Set, ":="),
                       accumulator.clone(),
                       synth(kind.operator(), kind.command()),
                       synth(Tag::LParen, "(")]);

        trace!(accumulator = %name, iterator = %iterator.raw, depth = pending + 1, "opened {}", command);

        self.loops = match kind {
            LoopKind::Sum => PendingLoops::AwaitingSumClose(pending + 1),
            LoopKind::Product => PendingLoops::AwaitingProductClose(pending + 1),
        };
        self.accumulators.push(accumulator);
        self.iterators.push(iterator);
        Ok(tokens)
    }

    /// Emits `) i := i + 1 \end{block} acc \end{block}` for every pending
    /// loop, innermost first.
    pub(super) fn close_loops(&mut self, at: Position) -> LexResult<Vec<Token>> {
        let count = match self.loops {
            PendingLoops::Idle => return Ok(Vec::new()),
            PendingLoops::AwaitingSumClose(n) | PendingLoops::AwaitingProductClose(n) => n,
        };
        if count != self.accumulators.len() || count != self.iterators.len() {
            return Err(LexError::UnbalancedLoop { loops:        count,
                                                  accumulators: self.accumulators.len(),
                                                  iterators:    self.iterators.len(),
                                                  coord:        at.coord, });
        }

        let synth = |tag: Tag, raw: &str| Token::new(tag, at, at, raw);
        let accumulators = std::mem::take(&mut self.accumulators);
        let iterators = std::mem::take(&mut self.iterators);
        let mut tokens = Vec::with_capacity(count * 9);

        for (accumulator, iterator) in accumulators.into_iter().zip(iterators).rev() {
            trace!(accumulator = %accumulator.raw, "closed loop");
            tokens.extend([synth(Tag::RParen, ")"),
                           synth(Tag::Ident, &iterator.raw),
                           synth(Tag::Set, ":="),
                           synth(Tag::Ident, &iterator.raw),
                           synth(Tag::Add, "+"),
                           synth(Tag::Number, "1"),
                           synth(Tag::EndB, "\\end{block}"),
                           synth(Tag::Ident, &accumulator.raw),
                           synth(Tag::EndB, "\\end{block}")]);
        }

        self.loops = PendingLoops::Idle;
        Ok(tokens)
    }

    /// Lexes `\placeholder{slot}` or `\placeholder[unit]{slot}`.
    ///
    /// The placeholder token spans the slot, braces included, which is the
    /// text later replaced by the computed value. The bracket form expands
    /// to `PLACEHOLDER / ( unit )`.
    pub(super) fn placeholder(&mut self, start: Position) -> LexResult<Vec<Token>> {
        let rest = self.raw.remainder();
        let trimmed = rest.trim_start();

        let mut tokens = Vec::new();
        let mut divisor = None;

        if trimmed.starts_with('[') {
            let open = self.cursor() + (rest.len() - trimmed.len());
            let Some(close) = trimmed.find(']').map(|i| open + i) else {
                return Err(LexError::ExpectedAttribute { command: "\\placeholder[...]".to_string(),
                                                         coord:   self.position(open).coord, });
            };
            self.raw.bump(close + 1 - self.cursor());
            tokens.push(Token::new(Tag::Skip, self.position(open), self.position(open + 1), "["));
            tokens.push(Token::new(Tag::Skip, self.position(close), self.position(close + 1), "]"));
            divisor = Some(open + 1..close);
        }

        let slot = self.attribute("\\placeholder")?;
        let (slot_start, slot_end) = (self.position(slot.start), self.position(slot.end));
        tokens.push(Token::new(Tag::Placeholder, slot_start, slot_end, "\\placeholder"));

        if let Some(range) = divisor {
            let (open, close) = (self.position(range.start), self.position(range.end));
            tokens.push(Token::new(Tag::Div, start, open, "/"));
            tokens.push(Token::new(Tag::LParen, open, open, "("));
            tokens.extend(self.lex_fragment(range)?);
            tokens.push(Token::new(Tag::RParen, close, close, ")"));
        }

        Ok(tokens)
    }
}
