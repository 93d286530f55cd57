use leptos::{either::Either, prelude::*};
use leptos::server_fn::codec::GetUrl;
use leptos_meta::{Meta, Title};

use crate::legal::{LegalDocument, LegalPage};

#[server(input = GetUrl)]
pub async fn get_legal_document(page: LegalPage) -> Result<LegalDocument, ServerFnError> {
    crate::legal::get_document(page).map_err(|e| {
        tracing::error!(page = page.slug(), error = %e, "legal document unavailable");
        ServerFnError::new(e)
    })
}

#[component]
pub fn LegalPageView(page: LegalPage) -> impl IntoView {
    let document = Resource::new(move || page, get_legal_document);

    view! {
        <div class="max-w-4xl mx-auto px-4 py-12">
            <Suspense fallback=move || {
                view! {
                    <div class="space-y-4">
                        <div class="loading-skeleton h-10 rounded w-1/2"></div>
                        <div class="loading-skeleton h-6 rounded"></div>
                        <div class="loading-skeleton h-6 rounded w-3/4"></div>
                    </div>
                }
            }>
                {move || Suspend::new(async move {
                    match document.await {
                        Ok(doc) => {
                            Either::Left(
                                view! {
                                    <Title text=doc.title.clone() />
                                    <Meta name="description" content=doc.description.clone() />
                                    <h1 class="text-3xl md:text-4xl font-bold mb-2">{doc.title}</h1>
                                    <p class="text-sm text-muted mb-8">
                                        {format!("Last updated: {}", doc.updated.format("%B %-d, %Y"))}
                                    </p>
                                    <article class="prose prose-invert max-w-none">
                                        <div inner_html=doc.content></div>
                                    </article>
                                },
                            )
                        }
                        Err(_) => {
                            Either::Right(
                                view! { <p class="text-red-500">"This page could not be loaded."</p> },
                            )
                        }
                    }
                })}
            </Suspense>
        </div>
    }
}
