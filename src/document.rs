//! The annotated document model.
//!
//! A [`Document`] owns its text, section spans, and ordered sentences. Each
//! sentence owns ordered [`SurfaceElement`]s, a dependency-edge list, and an
//! optional constituency [`ParseTree`]. Parsing and tokenization happen
//! upstream; this crate only consumes the result.
//!
//! Surface elements are stored in one arena in document order and addressed
//! by [`SurfaceId`]. Spans are immutable once an element is pushed; semantic
//! annotations are attached incrementally via
//! [`Document::attach_semantics`].

use crate::error::{Error, Result};
use crate::semantics::{SemItem, SemKind};
use crate::span::{MultiSpan, Span};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

// =============================================================================
// SurfaceId
// =============================================================================

/// Identifier of a surface element within one document.
///
/// Ids are assigned in document order, so ordering ids orders elements.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SurfaceId(pub usize);

impl std::fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0)
    }
}

// =============================================================================
// Dependencies
// =============================================================================

/// A dependency edge between two surface elements of the same sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// Edge label from the source parser (e.g. "nsubj", "dobj", "appos")
    pub label: String,
    /// Governing element
    pub governor: SurfaceId,
    /// Dependent element
    pub dependent: SurfaceId,
}

impl DependencyEdge {
    /// Create a new edge.
    #[must_use]
    pub fn new(label: impl Into<String>, governor: SurfaceId, dependent: SurfaceId) -> Self {
        Self {
            label: label.into(),
            governor,
            dependent,
        }
    }

    /// Classified edge kind.
    #[must_use]
    pub fn kind(&self) -> DependencyKind {
        DependencyKind::classify(&self.label)
    }

    /// Check whether the edge touches the given element.
    #[must_use]
    pub fn touches(&self, id: SurfaceId) -> bool {
        self.governor == id || self.dependent == id
    }
}

/// Coarse classification of dependency labels, collapsing parser-specific
/// label sets into the categories the syntactic-linkage rules reason about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyKind {
    /// Subject-like edges (nsubj, nsubjpass, csubj)
    Subject,
    /// Object-like edges (dobj, iobj, obj)
    Object,
    /// Prepositional attachment (prep, pobj, nmod)
    Prep,
    /// Coordination (cc, conj)
    Conj,
    /// NP-internal structure (det, amod, nn, compound, poss)
    NpInternal,
    /// Apposition
    Appositive,
    /// Everything else
    Other,
}

impl DependencyKind {
    /// Classify a raw label string.
    #[must_use]
    pub fn classify(label: &str) -> Self {
        let label = label.to_ascii_lowercase();
        if label == "appos" {
            DependencyKind::Appositive
        } else if label.starts_with("nsubj") || label.starts_with("csubj") || label == "subj" {
            DependencyKind::Subject
        } else if label == "dobj" || label == "iobj" || label.starts_with("obj") {
            DependencyKind::Object
        } else if label.starts_with("prep") || label == "pobj" || label.starts_with("nmod") {
            DependencyKind::Prep
        } else if label == "cc" || label.starts_with("conj") {
            DependencyKind::Conj
        } else if matches!(
            label.as_str(),
            "det" | "amod" | "nn" | "compound" | "poss" | "nmod:poss"
        ) {
            DependencyKind::NpInternal
        } else {
            DependencyKind::Other
        }
    }

    /// Kinds that may appear on a short syntactic-linkage path.
    #[must_use]
    pub fn is_linking(&self) -> bool {
        matches!(
            self,
            DependencyKind::Subject
                | DependencyKind::Object
                | DependencyKind::Prep
                | DependencyKind::Conj
                | DependencyKind::NpInternal
        )
    }
}

// =============================================================================
// SurfaceElement
// =============================================================================

/// Coarse syntactic classification flags for a surface element.
///
/// Derived from the head POS tag at construction; callers with chunker
/// output can override via the builder methods on [`SurfaceElement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyntacticFlags {
    /// Noun or noun phrase
    pub nominal: bool,
    /// Verb or verb phrase
    pub verbal: bool,
    /// Pronoun
    pub pronominal: bool,
    /// Adjective
    pub adjectival: bool,
    /// Determiner
    pub determiner: bool,
}

impl SyntacticFlags {
    fn from_tag(tag: &str) -> Self {
        let tag = tag.to_ascii_uppercase();
        SyntacticFlags {
            nominal: tag.starts_with("NN") || tag.starts_with("PRP") || tag.starts_with("WP"),
            verbal: tag.starts_with("VB") || tag == "MD",
            pronominal: tag.starts_with("PRP") || tag.starts_with("WP") || tag == "WDT",
            adjectival: tag.starts_with("JJ"),
            determiner: tag == "DT" || tag == "PDT",
        }
    }
}

/// A span of text treated as one syntactic/semantic unit: a word, a phrase,
/// or a coordinated group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceElement {
    /// Arena id; assigned when pushed into a [`Document`]
    pub id: SurfaceId,
    /// Character span(s); immutable once pushed
    pub spans: MultiSpan,
    /// Surface text
    pub text: String,
    /// Lemma of the syntactic head
    pub lemma: String,
    /// POS tag of the syntactic head (PTB tag set)
    pub tag: String,
    /// Syntactic classification flags
    pub flags: SyntacticFlags,
    /// Index of the containing sentence
    pub sentence: usize,
    /// Attached semantic annotations
    pub semantics: Vec<SemItem>,
}

impl SurfaceElement {
    /// Create an element to be pushed into a document. `id` and `sentence`
    /// are placeholders until [`Document::push_element`] assigns them.
    #[must_use]
    pub fn new(
        spans: impl Into<MultiSpan>,
        text: impl Into<String>,
        lemma: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        let tag = tag.into();
        let flags = SyntacticFlags::from_tag(&tag);
        Self {
            id: SurfaceId(usize::MAX),
            spans: spans.into(),
            text: text.into(),
            lemma: lemma.into(),
            tag,
            flags,
            sentence: usize::MAX,
            semantics: Vec::new(),
        }
    }

    /// Override the nominal flag (chunker output for NPs).
    #[must_use]
    pub fn nominal(mut self) -> Self {
        self.flags.nominal = true;
        self
    }

    /// Override the verbal flag (chunker output for VPs).
    #[must_use]
    pub fn verbal(mut self) -> Self {
        self.flags.verbal = true;
        self
    }

    /// Attach a semantic annotation at construction time.
    #[must_use]
    pub fn with_semantics(mut self, item: SemItem) -> Self {
        self.semantics.push(item);
        self
    }

    /// Convex hull of the element's span parts.
    #[must_use]
    pub fn span(&self) -> Span {
        self.spans.interval()
    }

    /// Is the element nominal (noun, NP, or pronoun)?
    #[must_use]
    pub fn is_nominal(&self) -> bool {
        self.flags.nominal
    }

    /// Is the element verbal?
    #[must_use]
    pub fn is_verbal(&self) -> bool {
        self.flags.verbal
    }

    /// Is the element a pronoun?
    #[must_use]
    pub fn is_pronominal(&self) -> bool {
        self.flags.pronominal
    }

    /// Does the element carry a semantic item of the given kind?
    #[must_use]
    pub fn has_kind(&self, kind: SemKind) -> bool {
        self.semantics.iter().any(|s| s.kind == kind)
    }

    /// Semantic-type strings of all attached items.
    #[must_use]
    pub fn sem_types(&self) -> Vec<&str> {
        self.semantics.iter().map(|s| s.sem_type.as_str()).collect()
    }

    /// Ontology concepts of all attached items.
    #[must_use]
    pub fn concepts(&self) -> Vec<&str> {
        self.semantics
            .iter()
            .filter_map(|s| s.concept.as_deref())
            .collect()
    }
}

// =============================================================================
// ParseTree
// =============================================================================

/// Arena-backed constituency parse tree for one sentence.
///
/// Leaves are bound to surface elements; [`ParseTree::distance`] is the
/// undirected path length between two bound elements, used by the
/// parse-tree salience strategy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseTree {
    nodes: Vec<ParseNode>,
    leaves: HashMap<SurfaceId, usize>,
}

/// One node of a [`ParseTree`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseNode {
    /// Constituent label (S, NP, VP, ...)
    pub label: String,
    /// Parent node index; `None` for the root
    pub parent: Option<usize>,
    /// Child node indices
    pub children: Vec<usize>,
}

impl ParseTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node under `parent` (or as root) and return its index.
    pub fn add_node(&mut self, label: impl Into<String>, parent: Option<usize>) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(ParseNode {
            label: label.into(),
            parent,
            children: Vec::new(),
        });
        if let Some(p) = parent {
            if let Some(node) = self.nodes.get_mut(p) {
                node.children.push(idx);
            }
        }
        idx
    }

    /// Bind a leaf node to a surface element.
    pub fn bind_leaf(&mut self, node: usize, element: SurfaceId) {
        self.leaves.insert(element, node);
    }

    /// Node index bound to an element, if any.
    #[must_use]
    pub fn leaf_of(&self, element: SurfaceId) -> Option<usize> {
        self.leaves.get(&element).copied()
    }

    fn ancestors(&self, mut node: usize) -> Vec<usize> {
        let mut chain = vec![node];
        while let Some(parent) = self.nodes.get(node).and_then(|n| n.parent) {
            chain.push(parent);
            node = parent;
        }
        chain
    }

    /// Depth of an element's leaf below the root (root = 0).
    #[must_use]
    pub fn depth(&self, element: SurfaceId) -> Option<usize> {
        let leaf = self.leaf_of(element)?;
        Some(self.ancestors(leaf).len() - 1)
    }

    /// Undirected path length between two bound elements, via the lowest
    /// common ancestor.
    #[must_use]
    pub fn distance(&self, a: SurfaceId, b: SurfaceId) -> Option<usize> {
        let la = self.leaf_of(a)?;
        let lb = self.leaf_of(b)?;
        let anc_a = self.ancestors(la);
        let anc_b = self.ancestors(lb);
        for (up_a, node) in anc_a.iter().enumerate() {
            if let Some(up_b) = anc_b.iter().position(|n| n == node) {
                return Some(up_a + up_b);
            }
        }
        None
    }
}

// =============================================================================
// Sentence and Document
// =============================================================================

/// One sentence: its span, its elements, its dependency edges, and an
/// optional parse tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sentence {
    /// Sentence index in document order
    pub index: usize,
    /// Character span of the sentence
    pub span: Span,
    /// Ids of the sentence's surface elements, in document order
    pub elements: Vec<SurfaceId>,
    /// Dependency edges between this sentence's elements
    pub dependencies: Vec<DependencyEdge>,
    /// Constituency parse, when the upstream parser supplied one
    pub parse: Option<ParseTree>,
}

/// A fully annotated document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Full document text
    pub text: String,
    sections: Vec<Span>,
    sentences: Vec<Sentence>,
    elements: Vec<SurfaceElement>,
}

impl Document {
    /// Create a document over its text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sections: Vec::new(),
            sentences: Vec::new(),
            elements: Vec::new(),
        }
    }

    /// Add a section span. Sections are optional; the section window filter
    /// degrades when none exist.
    pub fn add_section(&mut self, span: Span) {
        self.sections.push(span);
    }

    /// Append a sentence and return its index. Sentences must be added in
    /// document order.
    pub fn add_sentence(&mut self, span: Span) -> usize {
        let index = self.sentences.len();
        self.sentences.push(Sentence {
            index,
            span,
            elements: Vec::new(),
            dependencies: Vec::new(),
            parse: None,
        });
        index
    }

    /// Push a surface element into a sentence, assigning its id. Elements
    /// must be pushed in document order; spans must fall inside the text.
    pub fn push_element(&mut self, sentence: usize, mut element: SurfaceElement) -> Result<SurfaceId> {
        if sentence >= self.sentences.len() {
            return Err(Error::document(format!(
                "sentence index {sentence} out of range"
            )));
        }
        if element.spans.end() > self.text.len() {
            return Err(Error::document(format!(
                "element span {} exceeds text length {}",
                element.spans,
                self.text.len()
            )));
        }
        let id = SurfaceId(self.elements.len());
        element.id = id;
        element.sentence = sentence;
        self.sentences[sentence].elements.push(id);
        self.elements.push(element);
        Ok(id)
    }

    /// Add a dependency edge to a sentence.
    pub fn add_dependency(&mut self, sentence: usize, edge: DependencyEdge) -> Result<()> {
        let sent = self
            .sentences
            .get_mut(sentence)
            .ok_or_else(|| Error::document(format!("sentence index {sentence} out of range")))?;
        sent.dependencies.push(edge);
        Ok(())
    }

    /// Set a sentence's parse tree.
    pub fn set_parse(&mut self, sentence: usize, tree: ParseTree) -> Result<()> {
        let sent = self
            .sentences
            .get_mut(sentence)
            .ok_or_else(|| Error::document(format!("sentence index {sentence} out of range")))?;
        sent.parse = Some(tree);
        Ok(())
    }

    /// Attach a semantic annotation to an element.
    pub fn attach_semantics(&mut self, id: SurfaceId, item: SemItem) -> Result<()> {
        let el = self
            .elements
            .get_mut(id.0)
            .ok_or_else(|| Error::document(format!("unknown element {id}")))?;
        el.semantics.push(item);
        Ok(())
    }

    /// The element behind an id.
    ///
    /// Ids handed out by this document are always valid; `get` exists for
    /// callers holding ids of unknown provenance.
    #[must_use]
    pub fn element(&self, id: SurfaceId) -> &SurfaceElement {
        &self.elements[id.0]
    }

    /// Fallible element lookup.
    #[must_use]
    pub fn get(&self, id: SurfaceId) -> Option<&SurfaceElement> {
        self.elements.get(id.0)
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &SurfaceElement> {
        self.elements.iter()
    }

    /// Number of surface elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// All sentences in document order.
    #[must_use]
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// The sentence containing an element.
    #[must_use]
    pub fn sentence_of(&self, id: SurfaceId) -> &Sentence {
        &self.sentences[self.element(id).sentence]
    }

    /// Absolute sentence distance between two elements.
    #[must_use]
    pub fn sentence_distance(&self, a: SurfaceId, b: SurfaceId) -> usize {
        let sa = self.element(a).sentence;
        let sb = self.element(b).sentence;
        sa.abs_diff(sb)
    }

    /// Index of the section containing a span, if sections exist.
    #[must_use]
    pub fn section_of(&self, span: &Span) -> Option<usize> {
        self.sections.iter().position(|s| s.subsumes(span))
    }

    /// Does the document carry section spans at all?
    #[must_use]
    pub fn has_sections(&self) -> bool {
        !self.sections.is_empty()
    }

    /// Text slice for a span; empty when out of bounds.
    #[must_use]
    pub fn slice(&self, span: &Span) -> &str {
        self.text.get(span.start..span.end).unwrap_or("")
    }

    /// Text strictly between two elements, in span order.
    #[must_use]
    pub fn text_between(&self, a: SurfaceId, b: SurfaceId) -> &str {
        let (left, right) = if self.element(a).span() <= self.element(b).span() {
            (a, b)
        } else {
            (b, a)
        };
        let gap = Span::new(self.element(left).spans.end(), self.element(right).spans.start());
        self.slice(&gap)
    }

    /// Outgoing dependency edges of an element (element as governor).
    pub fn dependents_of(&self, id: SurfaceId) -> impl Iterator<Item = &DependencyEdge> {
        self.sentence_of(id)
            .dependencies
            .iter()
            .filter(move |e| e.governor == id)
    }

    /// Incoming dependency edges of an element (element as dependent).
    pub fn governors_of(&self, id: SurfaceId) -> impl Iterator<Item = &DependencyEdge> {
        self.sentence_of(id)
            .dependencies
            .iter()
            .filter(move |e| e.dependent == id)
    }

    /// Shortest undirected dependency path between two elements of the same
    /// sentence, up to `max_len` edges. `None` when the elements are in
    /// different sentences or no short path exists.
    #[must_use]
    pub fn dependency_path(
        &self,
        a: SurfaceId,
        b: SurfaceId,
        max_len: usize,
    ) -> Option<Vec<&DependencyEdge>> {
        let el_a = self.element(a);
        if el_a.sentence != self.element(b).sentence {
            return None;
        }
        let edges = &self.sentences[el_a.sentence].dependencies;

        // BFS over the undirected edge graph, remembering the edge that
        // reached each element.
        let mut back: HashMap<SurfaceId, (SurfaceId, usize)> = HashMap::new();
        let mut queue: VecDeque<(SurfaceId, usize)> = VecDeque::new();
        queue.push_back((a, 0));
        back.insert(a, (a, usize::MAX));
        while let Some((current, dist)) = queue.pop_front() {
            if current == b {
                let mut path = Vec::new();
                let mut at = b;
                while at != a {
                    let (prev, edge_idx) = back[&at];
                    path.push(&edges[edge_idx]);
                    at = prev;
                }
                path.reverse();
                return Some(path);
            }
            if dist == max_len {
                continue;
            }
            for (idx, edge) in edges.iter().enumerate() {
                if !edge.touches(current) {
                    continue;
                }
                let next = if edge.governor == current {
                    edge.dependent
                } else {
                    edge.governor
                };
                if !back.contains_key(&next) {
                    back.insert(next, (current, idx));
                    queue.push_back((next, dist + 1));
                }
            }
        }
        None
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn two_sentence_doc() -> (Document, SurfaceId, SurfaceId, SurfaceId) {
        // "TP53 regulates apoptosis. It is a tumor suppressor."
        let mut doc = Document::new("TP53 regulates apoptosis. It is a tumor suppressor.");
        let s0 = doc.add_sentence(Span::new(0, 25));
        let s1 = doc.add_sentence(Span::new(26, 51));
        let tp53 = doc
            .push_element(s0, SurfaceElement::new(MultiSpan::single(0, 4), "TP53", "tp53", "NN"))
            .unwrap();
        let reg = doc
            .push_element(
                s0,
                SurfaceElement::new(MultiSpan::single(5, 14), "regulates", "regulate", "VBZ"),
            )
            .unwrap();
        let it = doc
            .push_element(s1, SurfaceElement::new(MultiSpan::single(26, 28), "It", "it", "PRP"))
            .unwrap();
        doc.add_dependency(s0, DependencyEdge::new("nsubj", reg, tp53))
            .unwrap();
        (doc, tp53, reg, it)
    }

    #[test]
    fn test_ids_follow_document_order() {
        let (doc, tp53, reg, it) = two_sentence_doc();
        assert!(tp53 < reg && reg < it);
        assert_eq!(doc.element(tp53).text, "TP53");
        assert_eq!(doc.element(it).sentence, 1);
    }

    #[test]
    fn test_flags_from_tag() {
        let (doc, tp53, reg, it) = two_sentence_doc();
        assert!(doc.element(tp53).is_nominal());
        assert!(doc.element(reg).is_verbal());
        assert!(doc.element(it).is_pronominal());
        assert!(doc.element(it).is_nominal());
    }

    #[test]
    fn test_sentence_distance() {
        let (doc, tp53, _, it) = two_sentence_doc();
        assert_eq!(doc.sentence_distance(tp53, it), 1);
        assert_eq!(doc.sentence_distance(tp53, tp53), 0);
    }

    #[test]
    fn test_span_bounds_checked() {
        let mut doc = Document::new("short");
        let s = doc.add_sentence(Span::new(0, 5));
        let err = doc.push_element(
            s,
            SurfaceElement::new(MultiSpan::single(0, 99), "short", "short", "JJ"),
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_dependency_path_bfs() {
        let (doc, tp53, reg, _) = two_sentence_doc();
        let path = doc.dependency_path(tp53, reg, 2).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].label, "nsubj");

        // Cross-sentence: no path.
        let (doc, tp53, _, it) = two_sentence_doc();
        assert!(doc.dependency_path(tp53, it, 2).is_none());
    }

    #[test]
    fn test_dependency_kind_classification() {
        assert_eq!(DependencyKind::classify("nsubjpass"), DependencyKind::Subject);
        assert_eq!(DependencyKind::classify("dobj"), DependencyKind::Object);
        assert_eq!(DependencyKind::classify("prep_of"), DependencyKind::Prep);
        assert_eq!(DependencyKind::classify("nmod:poss"), DependencyKind::NpInternal);
        assert_eq!(DependencyKind::classify("appos"), DependencyKind::Appositive);
        assert_eq!(DependencyKind::classify("conj_and"), DependencyKind::Conj);
        assert_eq!(DependencyKind::classify("punct"), DependencyKind::Other);
    }

    #[test]
    fn test_parse_tree_distance() {
        // (S (NP a) (VP v (NP b)))
        let mut tree = ParseTree::new();
        let s = tree.add_node("S", None);
        let np1 = tree.add_node("NP", Some(s));
        let vp = tree.add_node("VP", Some(s));
        let np2 = tree.add_node("NP", Some(vp));
        tree.bind_leaf(np1, SurfaceId(0));
        tree.bind_leaf(np2, SurfaceId(1));

        assert_eq!(tree.depth(SurfaceId(0)), Some(1));
        assert_eq!(tree.depth(SurfaceId(1)), Some(2));
        assert_eq!(tree.distance(SurfaceId(0), SurfaceId(1)), Some(3));
        assert_eq!(tree.distance(SurfaceId(0), SurfaceId(0)), Some(0));
        assert_eq!(tree.distance(SurfaceId(0), SurfaceId(9)), None);
    }

    #[test]
    fn test_text_between() {
        let (doc, tp53, reg, _) = two_sentence_doc();
        assert_eq!(doc.text_between(tp53, reg), " ");
        assert_eq!(doc.text_between(reg, tp53), " ");
    }

    #[test]
    fn test_section_lookup() {
        let mut doc = Document::new("abcdef");
        assert!(!doc.has_sections());
        doc.add_section(Span::new(0, 3));
        doc.add_section(Span::new(3, 6));
        assert_eq!(doc.section_of(&Span::new(1, 2)), Some(0));
        assert_eq!(doc.section_of(&Span::new(4, 6)), Some(1));
        assert_eq!(doc.section_of(&Span::new(2, 5)), None);
    }
}
