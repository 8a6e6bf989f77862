//! Filtrage plein texte et pagination côté client.

/// Champs visibles soumis à la recherche.
pub trait Filtrable {
    fn campos_busqueda(&self) -> Vec<String>;
}

/// Sous-chaîne insensible à la casse ; un terme vide ou blanc ne filtre rien.
pub fn filtrar<T: Filtrable + Clone>(items: &[T], termino: &str) -> Vec<T> {
    let termino = termino.trim().to_lowercase();
    if termino.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| {
            item.campos_busqueda()
                .iter()
                .any(|campo| campo.to_lowercase().contains(&termino))
        })
        .cloned()
        .collect()
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 { 0 } else { len.div_ceil(page_size) }
}

/// Page `page` (base 1). Hors bornes : tranche vide.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Vec<T> {
    if page == 0 || page_size == 0 {
        return Vec::new();
    }
    items
        .iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect()
}

/// État de recherche + page courante d'une liste.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListState {
    pub filtro: String,
    pub pagina: usize,
    pub page_size: usize,
}

impl ListState {
    pub fn new(page_size: usize) -> Self {
        Self {
            filtro: String::new(),
            pagina: 1,
            page_size,
        }
    }

    /// Toute modification du filtre ramène à la première page.
    pub fn set_filtro(&mut self, filtro: impl Into<String>) {
        self.filtro = filtro.into();
        self.pagina = 1;
    }

    pub fn set_pagina(&mut self, pagina: usize) {
        self.pagina = pagina.max(1);
    }

    /// Ramène la page courante dans `1..=total_pages` après une relecture.
    pub fn acotar(&mut self, len: usize) {
        self.pagina = self.pagina.clamp(1, total_pages(len, self.page_size).max(1));
    }

    /// La page affichée ne dépasse jamais la dernière page du résultat filtré.
    pub fn vista<T: Filtrable + Clone>(&self, items: &[T]) -> Vista<T> {
        let filtrados = filtrar(items, &self.filtro);
        let total_pages = total_pages(filtrados.len(), self.page_size);
        let pagina = self.pagina.clamp(1, total_pages.max(1));
        Vista {
            total: filtrados.len(),
            total_pages,
            pagina,
            filas: paginate(&filtrados, pagina, self.page_size),
        }
    }
}

/// Résultat filtré puis paginé, prêt pour le tableau.
#[derive(Clone, Debug, PartialEq)]
pub struct Vista<T> {
    pub filas: Vec<T>,
    pub total: usize,
    pub total_pages: usize,
    pub pagina: usize,
}

/* -------------------------------------------------------------------------- */
/*                       fenêtre de numéros du paginateur                      */
/* -------------------------------------------------------------------------- */

pub const MAX_VISIBLE: usize = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

pub fn page_window(current: usize, total: usize, max_visible: usize) -> Vec<PageItem> {
    if total <= max_visible || max_visible == 0 {
        return (1..=total).map(PageItem::Page).collect();
    }

    let half = max_visible / 2;
    let mut start = current.saturating_sub(half).max(1);
    let end = (start + max_visible - 1).min(total);
    if end - start < max_visible - 1 {
        start = (end + 1).saturating_sub(max_visible).max(1);
    }

    let mut items = Vec::with_capacity(max_visible + 4);
    if start > 1 {
        items.push(PageItem::Page(1));
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
    }
    items.extend((start..=end).map(PageItem::Page));
    if end < total {
        if end < total - 1 {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(total));
    }
    items
}

#[cfg(test)]
mod tests {
    use super::PageItem::{Ellipsis, Page};
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Fila(&'static str, &'static str);

    impl Filtrable for Fila {
        fn campos_busqueda(&self) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    fn filas() -> Vec<Fila> {
        vec![
            Fila("Ana", "Pérez"),
            Fila("LUIS", "Gómez"),
            Fila("Marta", "Luisetti"),
        ]
    }

    #[test]
    fn filter_is_case_insensitive_on_any_field() {
        let found = filtrar(&filas(), "luis");
        assert_eq!(found, vec![Fila("LUIS", "Gómez"), Fila("Marta", "Luisetti")]);
    }

    #[test]
    fn blank_filter_keeps_everything() {
        assert_eq!(filtrar(&filas(), ""), filas());
        assert_eq!(filtrar(&filas(), "   "), filas());
    }

    #[test]
    fn pages_never_exceed_size() {
        let items: Vec<u32> = (1..=13).collect();
        assert_eq!(total_pages(items.len(), 6), 3);
        assert_eq!(paginate(&items, 1, 6).len(), 6);
        assert_eq!(paginate(&items, 3, 6), vec![13]);
        assert!(paginate(&items, 4, 6).is_empty());
        assert!(paginate(&items, 0, 6).is_empty());
    }

    #[test]
    fn empty_list_has_empty_first_page() {
        let empty: Vec<u32> = Vec::new();
        assert_eq!(total_pages(0, 10), 0);
        assert!(paginate(&empty, 1, 10).is_empty());
    }

    #[test]
    fn changing_filter_resets_page() {
        let mut state = ListState::new(2);
        state.set_pagina(3);
        state.set_filtro("E");
        assert_eq!(state.pagina, 1);

        let vista = state.vista(&filas());
        assert_eq!(vista.total, 3);
        assert_eq!(vista.total_pages, 2);
        assert_eq!(vista.filas.len(), 2);
    }

    #[test]
    fn page_past_the_end_falls_back_to_last() {
        let mut state = ListState::new(2);
        state.set_pagina(5);

        let vista = state.vista(&filas());
        assert_eq!(vista.total_pages, 2);
        assert_eq!(vista.pagina, 2);
        assert_eq!(vista.filas, vec![Fila("Marta", "Luisetti")]);

        state.acotar(1);
        assert_eq!(state.pagina, 1);
        state.acotar(0);
        assert_eq!(state.pagina, 1);
    }

    #[test]
    fn small_totals_show_every_page() {
        assert_eq!(page_window(2, 4, 7), vec![Page(1), Page(2), Page(3), Page(4)]);
    }

    #[test]
    fn window_in_the_middle_has_both_ellipses() {
        assert_eq!(
            page_window(10, 20, 7),
            vec![
                Page(1),
                Ellipsis,
                Page(7),
                Page(8),
                Page(9),
                Page(10),
                Page(11),
                Page(12),
                Page(13),
                Ellipsis,
                Page(20)
            ]
        );
    }

    #[test]
    fn window_clamps_at_both_ends() {
        assert_eq!(
            page_window(1, 10, 7),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Page(7), Ellipsis, Page(10)]
        );
        assert_eq!(
            page_window(10, 10, 7),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Page(7), Page(8), Page(9), Page(10)]
        );
        assert_eq!(
            page_window(5, 9, 7),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Page(7), Page(8), Page(9)]
        );
    }
}
