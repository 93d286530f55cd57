use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Warning,
    Danger,
}

impl ToastKind {
    fn style(self) -> (&'static str, &'static str) {
        match self {
            ToastKind::Success => ("✓", "bg-emerald-600"),
            ToastKind::Warning => ("⚠", "bg-amber-600"),
            ToastKind::Danger => ("✕", "bg-red-600"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    id: u64,
    kind: ToastKind,
    title: String,
    description: Option<String>,
}

#[cfg(feature = "hydrate")]
const TOAST_LIFETIME: std::time::Duration = std::time::Duration::from_secs(5);

/// Handle for showing notifications from any component.
#[derive(Clone, Copy)]
pub struct Toasts {
    items: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl Toasts {
    pub fn push(&self, kind: ToastKind, title: impl Into<String>, description: Option<String>) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.items.update(|items| {
            items.push(Toast {
                id,
                kind,
                title: title.into(),
                description,
            })
        });

        #[cfg(feature = "hydrate")]
        {
            let toasts = *self;
            set_timeout(move || toasts.dismiss(id), TOAST_LIFETIME);
        }
    }

    pub fn success(&self, title: impl Into<String>) {
        self.push(ToastKind::Success, title, None);
    }

    pub fn dismiss(&self, id: u64) {
        self.items.update(|items| items.retain(|t| t.id != id));
    }
}

pub fn provide_toasts() -> Toasts {
    let toasts = Toasts {
        items: RwSignal::new(Vec::new()),
        next_id: StoredValue::new(0),
    };
    provide_context(toasts);
    toasts
}

pub fn use_toasts() -> Toasts {
    expect_context::<Toasts>()
}

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = use_toasts();

    view! {
        <div class="fixed top-20 right-4 z-50 space-y-2 w-80 max-w-[calc(100vw-2rem)]">
            <For each=move || toasts.items.get() key=|t| t.id let:toast>
                {
                    let (icon, bg) = toast.kind.style();
                    let id = toast.id;
                    view! {
                        <div
                            role="status"
                            class=format!(
                                "flex items-start gap-3 {bg} text-white px-4 py-3 rounded-lg shadow-lg",
                            )
                        >
                            <span class="text-lg leading-none">{icon}</span>
                            <div class="flex-1">
                                <p class="text-sm font-semibold">{toast.title}</p>
                                {toast
                                    .description
                                    .map(|d| view! { <p class="text-sm opacity-90">{d}</p> })}
                            </div>
                            <button
                                class="text-white/80 hover:text-white"
                                aria-label="Dismiss"
                                on:click=move |_| toasts.dismiss(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            </For>
        </div>
    }
}
