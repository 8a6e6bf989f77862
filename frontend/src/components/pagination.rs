use yew::prelude::*;

use gestion_core::listing::{page_window, PageItem, MAX_VISIBLE};

#[derive(Properties, PartialEq)]
pub struct PaginationProps {
    pub pagina: usize,
    pub total_pages: usize,
    pub on_cambio: Callback<usize>,
}

fn boton(etiqueta: String, destino: usize, deshabilitado: bool, activo: bool, on_cambio: &Callback<usize>) -> Html {
    let onclick = {
        let on_cambio = on_cambio.clone();
        Callback::from(move |_| on_cambio.emit(destino))
    };
    let fondo = if activo { "#3f51b5; color:#fff" } else { "#fff; color:#333" };
    html! {
        <button
            {onclick}
            disabled={deshabilitado}
            style={format!("margin:0 2px; padding:0.3rem 0.6rem; border:1px solid #ccc; border-radius:4px; cursor:pointer; background:{fondo};")}
        >
            { etiqueta }
        </button>
    }
}

#[function_component(Pagination)]
pub fn pagination(props: &PaginationProps) -> Html {
    let PaginationProps { pagina, total_pages, on_cambio } = props;
    let (pagina, total) = (*pagina, *total_pages);
    if total <= 1 {
        return Html::default();
    }

    let primera = pagina <= 1;
    let ultima = pagina >= total;

    html! {
        <nav style="display:flex; justify-content:center; align-items:center; margin-top:1rem;">
            { boton("«".into(), 1, primera, false, on_cambio) }
            { boton("‹".into(), pagina.saturating_sub(1).max(1), primera, false, on_cambio) }
            { for page_window(pagina, total, MAX_VISIBLE).into_iter().map(|item| match item {
                PageItem::Page(n) => boton(n.to_string(), n, false, n == pagina, on_cambio),
                PageItem::Ellipsis => html! { <span style="margin:0 4px;">{ "…" }</span> },
            }) }
            { boton("›".into(), (pagina + 1).min(total), ultima, false, on_cambio) }
            { boton("»".into(), total, ultima, false, on_cambio) }
        </nav>
    }
}
