//! Cycle detection over resolved `extends` / `implements` edges.
//!
//! Tarjan's strongly connected components, iterative so deep hierarchies
//! cannot overflow the stack.

use jstruct_core::DeclIndex;

use crate::lower::CompilationUnit;
use crate::model::{TypeId, TypeInfo, UnitId};

/// Every type that lies on an inheritance cycle, in batch order.
pub(super) fn find(units: &[CompilationUnit], info: &[Vec<TypeInfo>]) -> Vec<TypeId> {
    let mut ids = Vec::new();
    let mut offsets = Vec::with_capacity(units.len());
    for (u, unit) in units.iter().enumerate() {
        offsets.push(ids.len());
        ids.extend(
            (0..unit.decls().len())
                .map(|d| TypeId::new(UnitId::from_usize(u), DeclIndex::from_usize(d))),
        );
    }
    let node = |id: TypeId| offsets[id.unit.as_usize()] + id.decl.as_usize();

    let edges: Vec<Vec<usize>> = ids
        .iter()
        .map(|&id| {
            let type_info = &info[id.unit.as_usize()][id.decl.as_usize()];
            type_info
                .superclass
                .iter()
                .chain(&type_info.interfaces)
                .filter_map(|r| r.declared())
                .map(&node)
                .collect()
        })
        .collect();

    let cyclic = Tarjan::new(&edges).run();
    ids.into_iter()
        .zip(cyclic)
        .filter_map(|(id, on_cycle)| on_cycle.then_some(id))
        .collect()
}

struct Tarjan<'e> {
    edges: &'e [Vec<usize>],
    next_index: usize,
    index: Vec<Option<usize>>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    cyclic: Vec<bool>,
}

impl<'e> Tarjan<'e> {
    fn new(edges: &'e [Vec<usize>]) -> Self {
        let n = edges.len();
        Self {
            edges,
            next_index: 0,
            index: vec![None; n],
            lowlink: vec![0; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            cyclic: vec![false; n],
        }
    }

    fn run(mut self) -> Vec<bool> {
        for root in 0..self.edges.len() {
            if self.index[root].is_none() {
                self.connect(root);
            }
        }
        self.cyclic
    }

    fn visit(&mut self, v: usize) {
        self.index[v] = Some(self.next_index);
        self.lowlink[v] = self.next_index;
        self.next_index += 1;
        self.stack.push(v);
        self.on_stack[v] = true;
    }

    fn connect(&mut self, root: usize) {
        // Explicit call stack: node plus the position of its next edge.
        let mut calls = vec![(root, 0usize)];
        self.visit(root);

        while let Some(&(v, edge)) = calls.last() {
            if let Some(&w) = self.edges[v].get(edge) {
                if let Some(top) = calls.last_mut() {
                    top.1 += 1;
                }
                match self.index[w] {
                    None => {
                        self.visit(w);
                        calls.push((w, 0));
                    }
                    Some(w_index) if self.on_stack[w] => {
                        self.lowlink[v] = self.lowlink[v].min(w_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            calls.pop();
            if let Some(&(parent, _)) = calls.last() {
                self.lowlink[parent] = self.lowlink[parent].min(self.lowlink[v]);
            }
            if Some(self.lowlink[v]) == self.index[v] {
                self.pop_component(v);
            }
        }
    }

    fn pop_component(&mut self, root: usize) {
        let mut component = Vec::new();
        while let Some(w) = self.stack.pop() {
            self.on_stack[w] = false;
            component.push(w);
            if w == root {
                break;
            }
        }
        let self_loop = self.edges[root].contains(&root);
        if component.len() > 1 || self_loop {
            for w in component {
                self.cyclic[w] = true;
            }
        }
    }
}
