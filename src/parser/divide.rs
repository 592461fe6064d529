//! The string divider — every division/splice operation at every level
//! of the parser element tree funnels through here.
//!
//! Expressed as a trait with default methods so every parser level
//! (`Message`, `Segment`, `Field`, `Repetition`, `Component`) gets
//! `Replace`/`Insert`/`Delete`/`Move`/`Pad`/`Count` for free by supplying
//! only its own span, its buffer, its child delimiter, and a cache slot —
//! one polymorphic contract, applied one layer below the public `Element`
//! trait (crate::element).

use crate::buffer::Buffer;
use crate::error::{Hl7Error, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Split `text` on every occurrence of `delim`, returning
/// `(offset, length)` pairs relative to the start of `text`.
pub(crate) fn split_spans(text: &str, delim: char) -> Vec<(usize, usize)> {
    let mut result = Vec::new();
    let mut start = 0usize;
    for (idx, ch) in text.char_indices() {
        if ch == delim {
            result.push((start, idx - start));
            start = idx + ch.len_utf8();
        }
    }
    result.push((start, text.len() - start));
    result
}

/// The index of the last non-empty subdivision; trailing empties are not
/// counted but interior empties are.
pub(crate) fn count_nonempty_trailing(divisions: &[(usize, usize)]) -> usize {
    let mut last_nonempty = 0;
    for (i, (_, len)) in divisions.iter().enumerate() {
        if *len > 0 {
            last_nonempty = i + 1;
        }
    }
    last_nonempty
}

/// A per-node cache of its children's divisions, tagged with the buffer
/// version it was computed at.
#[derive(Debug, Default)]
pub(crate) struct DivisionCache {
    inner: RefCell<Option<(u64, Vec<(usize, usize)>)>>,
}

impl DivisionCache {
    pub(crate) fn get_or_compute(
        &self,
        version: u64,
        compute: impl FnOnce() -> Vec<(usize, usize)>,
    ) -> Vec<(usize, usize)> {
        {
            let cached = self.inner.borrow();
            if let Some((v, divisions)) = cached.as_ref() {
                if *v == version {
                    return divisions.clone();
                }
            }
        }
        let divisions = compute();
        *self.inner.borrow_mut() = Some((version, divisions.clone()));
        divisions
    }
}

/// Implemented by every non-leaf parser node. `own_span` resolves this
/// node's absolute `(offset, length)` within the shared buffer by asking
/// its parent (bounded recursion of depth <= 4); everything else is a
/// default method built on top of that and `child_delimiter`.
pub(crate) trait Divisible {
    fn buffer(&self) -> &Buffer;
    fn cache(&self) -> &DivisionCache;
    fn child_delimiter(&self) -> char;
    fn own_span(&self) -> Result<(usize, usize)>;

    fn divisions(&self) -> Result<Vec<(usize, usize)>> {
        let (start, len) = self.own_span()?;
        let delim = self.child_delimiter();
        let buffer = self.buffer();
        let version = buffer.version();
        Ok(self.cache().get_or_compute(version, || {
            let text = buffer.slice(start, len);
            split_spans(&text, delim)
                .into_iter()
                .map(|(off, l)| (start + off, l))
                .collect()
        }))
    }

    /// Absolute `(offset, length)` of the 0-based child `index`, if it
    /// exists without needing to be materialized.
    fn child_span(&self, index: usize) -> Result<Option<(usize, usize)>> {
        Ok(self.divisions()?.get(index).copied())
    }

    fn child_count(&self) -> Result<usize> {
        Ok(count_nonempty_trailing(&self.divisions()?))
    }

    /// Ensure at least `index + 1` children exist, appending empty ones
    /// (each preceded by a delimiter) as needed. Returns the up-to-date
    /// division list, with the requested index guaranteed present.
    fn pad(&self, index: usize) -> Result<Vec<(usize, usize)>> {
        let mut divisions = self.divisions()?;
        if index < divisions.len() {
            return Ok(divisions);
        }
        let (start, len) = self.own_span()?;
        let pad_count = index + 1 - divisions.len();
        let delim = self.child_delimiter();
        let filler: String = std::iter::repeat(delim).take(pad_count).collect();
        self.buffer().replace(start + len, 0, &filler);
        divisions = self.divisions()?;
        Ok(divisions)
    }

    /// Splice `value` into the 0-based child `index`, padding first if
    /// necessary.
    fn set_child(&self, index: usize, value: &str) -> Result<()> {
        let divisions = self.pad(index)?;
        let (offset, len) = divisions[index];
        self.buffer().replace(offset, len, value);
        Ok(())
    }

    fn child_value(&self, index: usize) -> Result<Option<String>> {
        match self.child_span(index)? {
            Some((offset, len)) => Ok(Some(self.buffer().slice(offset, len))),
            None => Ok(None),
        }
    }

    /// Remove subdivision `index` and one adjacent delimiter; a no-op if
    /// the subdivision is empty or out of range.
    fn delete_child(&self, index: usize) -> Result<()> {
        let divisions = self.divisions()?;
        let Some(&(offset, len)) = divisions.get(index) else {
            return Ok(());
        };
        if len == 0 {
            return Ok(());
        }
        let delim_len = self.child_delimiter().len_utf8();
        let (mut remove_start, mut remove_len) = (offset, len);
        if index > 0 {
            remove_start -= delim_len;
            remove_len += delim_len;
        } else if divisions.len() > 1 {
            remove_len += delim_len;
        }
        self.buffer().replace(remove_start, remove_len, "");
        Ok(())
    }

    /// Rewrite subdivision `index` to `value + delimiter + previous[index]`.
    fn insert_child(&self, index: usize, value: &str) -> Result<()> {
        let divisions = self.pad(index)?;
        let (offset, len) = divisions[index];
        let previous = self.buffer().slice(offset, len);
        let delim = self.child_delimiter();
        let combined = format!("{value}{delim}{previous}");
        self.buffer().replace(offset, len, &combined);
        Ok(())
    }

    /// Delete then insert.
    fn move_child(&self, src: usize, dst: usize) -> Result<()> {
        let value = self.child_value(src)?.unwrap_or_default();
        self.delete_child(src)?;
        self.insert_child(dst, &value)?;
        Ok(())
    }
}

/// Resolve child `index` of `parent`, falling back to a zero-length
/// "virtual" span immediately past the parent's content when the index
/// isn't materialized yet — reads never materialize storage.
pub(crate) fn resolve_child_span(parent: &impl Divisible, index: usize) -> Result<(usize, usize)> {
    if let Some(span) = parent.child_span(index)? {
        return Ok(span);
    }
    let (start, len) = parent.own_span()?;
    Ok((start + len, 0))
}

/// A cache mapping 0-based index to a weakly-held child node, so repeated
/// access to the same index returns the same object while it is still
/// referenced elsewhere, without the parent keeping it alive forever and
/// without a reference cycle back up to it.
pub(crate) struct ChildCache<T> {
    inner: RefCell<HashMap<usize, Weak<T>>>,
}

impl<T> Default for ChildCache<T> {
    fn default() -> Self {
        ChildCache {
            inner: RefCell::new(HashMap::new()),
        }
    }
}

impl<T> ChildCache<T> {
    pub(crate) fn get_or_create(&self, index: usize, create: impl FnOnce() -> Rc<T>) -> Rc<T> {
        if let Some(existing) = self.inner.borrow().get(&index).and_then(Weak::upgrade) {
            return existing;
        }
        let rc = create();
        self.inner.borrow_mut().insert(index, Rc::downgrade(&rc));
        rc
    }
}

impl<T> std::fmt::Debug for ChildCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ChildCache({} entries)", self.inner.borrow().len())
    }
}

pub(crate) fn check_index(index: i64, allow_zero: bool) -> Result<usize> {
    if index < 0 || (index == 0 && !allow_zero) {
        return Err(Hl7Error::InvalidIndex {
            index,
            reason: "indices are 1-based".to_string(),
        });
    }
    Ok(index as usize)
}
