use dioxus::prelude::*;
use ui::{LogoutButton, ProtectedRoute};

/// The application view behind the login.
#[component]
pub fn Protected() -> Element {
    rsx! {
        ProtectedRoute {
            div {
                class: "min-h-screen bg-gray-50",
                header {
                    class: "bg-white shadow",
                    div {
                        class: "max-w-7xl mx-auto py-6 px-4 sm:px-6 lg:px-8",
                        style: "display: flex; justify-content: space-between; align-items: center;",
                        h1 { class: "text-3xl font-bold text-gray-900", "Query KubeTalk" }
                        LogoutButton {}
                    }
                }
                main {
                    div {
                        class: "max-w-7xl mx-auto py-6 sm:px-6 lg:px-8",
                        "I am protected"
                    }
                }
            }
        }
    }
}
