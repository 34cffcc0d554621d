use chrono::Local;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::modal::use_modal;
use crate::contact::{self, ContactSubmission};

fn input_value(node: &NodeRef) -> String {
    node.cast::<HtmlInputElement>().map(|i| i.value()).unwrap_or_default()
}

#[function_component(ContactForm)]
pub fn contact_form() -> Html {
    let modal = use_modal();
    let sending = use_state(|| false);
    let form = use_node_ref();
    let name = use_node_ref();
    let email = use_node_ref();
    let phone = use_node_ref();
    let message = use_node_ref();

    let onsubmit = {
        let sending = sending.clone();
        let form = form.clone();
        let (name, email, phone, message) = (name.clone(), email.clone(), phone.clone(), message.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *sending {
                return;
            }
            let submission = ContactSubmission::new(
                &input_value(&name),
                &input_value(&email),
                &input_value(&phone),
                &message
                    .cast::<HtmlTextAreaElement>()
                    .map(|t| t.value())
                    .unwrap_or_default(),
            );
            if let Err(problem) = submission.validate() {
                modal.alert(problem.to_string());
                return;
            }

            sending.set(true);
            let sending = sending.clone();
            let form = form.clone();
            let modal = modal.clone();
            spawn_local(async move {
                let timestamp = Local::now().format("%-m/%-d/%Y, %-I:%M:%S %p").to_string();
                match contact::submit(&submission, &timestamp).await {
                    Ok(()) => log::info!("contact request sent for {}", submission.name),
                    // The sheet script often trips CORS even when the row was written.
                    Err(e) => log::error!("Submission error: {}", e),
                }
                modal.success(submission.name.clone());
                if let Some(form) = form.cast::<HtmlFormElement>() {
                    form.reset();
                }
                sending.set(false);
            });
        })
    };

    html! {
        <form id="contactForm" class="contact__form" ref={form} {onsubmit}>
            <div class="form__row">
                <input ref={name} type="text" name="name" placeholder="Your name" />
                <input ref={email} type="email" name="email" placeholder="Email address" />
            </div>
            <input ref={phone} type="tel" name="phone" placeholder="Phone (10 digits)" inputmode="numeric" />
            <textarea ref={message} name="message" rows="4" placeholder="Tell us about your project" />
            <button type="submit" class="btn btn--primary" disabled={*sending}>
                { if *sending { "Sending..." } else { "Send Request" } }
            </button>
        </form>
    }
}
