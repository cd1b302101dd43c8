// [libs/core/similarity/src/lib.rs]
/*!
 * =================================================================
 * APARATO: APPROXIMATE NEAR-NEIGHBOR TOOLKIT (V1.0)
 * CLASIFICACIÓN: CORE PRIMITIVE (ESTRATO L1)
 * RESPONSABILIDAD: UNION-FIND + INDICES DE BUSQUEDA APROXIMADA
 *
 * Tres piezas que el clusterer combina: un disjoint-set clasico, un
 * indice SimHash por bandas (para fingerprints de texto) y un BK-tree
 * (para fingerprints de imagen), ambos bajo la metrica de Hamming.
 * =================================================================
 */

mod bk_tree;
mod simhash_index;
mod union_find;

pub use bk_tree::BkTree;
pub use simhash_index::SimHashIndex;
pub use union_find::UnionFind;
