//! Hosted payment form (Stripe Elements) mounted through `document::eval`.

use crate::config::AppConfig;
use crate::models::PaymentOutcome;
use dioxus::prelude::*;
use serde::Deserialize;

const ELEMENT_ID: &str = "vipix-payment-element";

#[derive(Debug, Default, Deserialize, PartialEq)]
struct ConfirmReply {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: Option<String>,
}

impl ConfirmReply {
    fn into_outcome(self) -> PaymentOutcome {
        let message = self.message.unwrap_or_default();
        match self.status.as_str() {
            "succeeded" | "processing" => PaymentOutcome::Succeeded,
            "failed" => PaymentOutcome::Failed(message),
            _ if message.is_empty() => {
                PaymentOutcome::Error("An unexpected error occurred.".to_string())
            }
            _ => PaymentOutcome::Error(message),
        }
    }
}

fn mount_script(publishable_key: &str, client_secret: &str) -> String {
    format!(
        r##"const key = {key:?};
const secret = {secret:?};
const load = () => new Promise((resolve, reject) => {{
  if (window.Stripe) return resolve();
  const s = document.createElement("script");
  s.src = "https://js.stripe.com/v3/";
  s.onload = resolve;
  s.onerror = () => reject(new Error("Could not load payment script"));
  document.head.appendChild(s);
}});
try {{
  await load();
  const stripe = window.Stripe(key);
  const elements = stripe.elements({{ clientSecret: secret }});
  const payment = elements.create("payment");
  payment.mount("#{element}");
  window.__vipixPay = {{ stripe, elements }};
  dioxus.send({{ status: "mounted" }});
}} catch (e) {{
  dioxus.send({{ status: "error", message: String((e && e.message) || e) }});
}}"##,
        key = publishable_key,
        secret = client_secret,
        element = ELEMENT_ID,
    )
}

fn confirm_script(return_url: &str) -> String {
    format!(
        r#"const pay = window.__vipixPay;
if (!pay) {{
  dioxus.send({{ status: "error", message: "Payment form is not ready" }});
}} else {{
  try {{
    const result = await pay.stripe.confirmPayment({{
      elements: pay.elements,
      confirmParams: {{ return_url: {url:?} }},
      redirect: "if_required",
    }});
    if (result.error) {{
      dioxus.send({{ status: "failed", message: result.error.message }});
    }} else {{
      dioxus.send({{ status: (result.paymentIntent && result.paymentIntent.status) || "succeeded" }});
    }}
  }} catch (e) {{
    dioxus.send({{ status: "error", message: String((e && e.message) || e) }});
  }}
}}"#,
        url = return_url,
    )
}

/// Payment element for a client secret; reports one outcome per submit
#[component]
pub fn CheckoutForm(client_secret: String, on_outcome: EventHandler<PaymentOutcome>) -> Element {
    let config = use_context::<AppConfig>();
    let mut ready = use_signal(|| false);
    let mut processing = use_signal(|| false);
    let mut mount_error = use_signal(|| None::<String>);

    let key = config.stripe_publishable_key.clone();
    use_effect(use_reactive!(|(client_secret,)| {
        let script = mount_script(&key, &client_secret);
        spawn(async move {
            let mut eval = document::eval(&script);
            match eval.recv::<ConfirmReply>().await {
                Ok(reply) if reply.status == "mounted" => ready.set(true),
                Ok(reply) => {
                    let msg = reply.message.unwrap_or_default();
                    log::error!("Payment form failed to mount: {}", msg);
                    mount_error.set(Some(msg));
                }
                Err(e) => mount_error.set(Some(format!("{:?}", e))),
            }
        });
    }));

    let return_url = format!("{}/events", config.public_origin);
    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if processing() || !ready() {
            return;
        }
        processing.set(true);
        let script = confirm_script(&return_url);
        spawn(async move {
            let outcome = match document::eval(&script).recv::<ConfirmReply>().await {
                Ok(reply) => reply.into_outcome(),
                Err(e) => PaymentOutcome::Error(format!("{:?}", e)),
            };
            log::info!("Payment finished: {:?}", outcome);
            processing.set(false);
            on_outcome.call(outcome);
        });
    };

    rsx! {
        form { onsubmit: submit, style: "display: flex; flex-direction: column; gap: 16px;",
            div { id: ELEMENT_ID, style: "min-height: 120px;" }
            if let Some(err) = mount_error() {
                p { style: "color: #dc2626; margin: 0;", "{err}" }
            }
            button {
                r#type: "submit",
                class: "btn-primary",
                style: "padding: 12px;",
                disabled: processing() || !ready(),
                if processing() { "Processing..." } else { "Complete Payment" }
            }
        }
    }
}

/// Toast title and text for a payment outcome
pub fn outcome_notice(outcome: &PaymentOutcome) -> (&'static str, String, bool) {
    match outcome {
        PaymentOutcome::Succeeded => ("Payment Successful", "Thank you for your purchase!".to_string(), false),
        PaymentOutcome::Failed(msg) => ("Payment Failed", msg.clone(), true),
        PaymentOutcome::Error(msg) => ("Payment Error", msg.clone(), true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_reply_mapping() {
        let reply: ConfirmReply =
            serde_json::from_str(r#"{"status": "failed", "message": "Your card was declined."}"#)
                .unwrap();
        assert_eq!(
            reply.into_outcome(),
            PaymentOutcome::Failed("Your card was declined.".to_string())
        );

        let reply: ConfirmReply = serde_json::from_str(r#"{"status": "succeeded"}"#).unwrap();
        assert_eq!(reply.into_outcome(), PaymentOutcome::Succeeded);

        let reply: ConfirmReply = serde_json::from_str(r#"{"status": "error"}"#).unwrap();
        assert!(matches!(reply.into_outcome(), PaymentOutcome::Error(_)));
    }

    #[test]
    fn test_confirm_script_uses_return_url() {
        let script = confirm_script("https://vipix.app/events");
        assert!(script.contains("\"https://vipix.app/events\""));
        assert!(script.contains("redirect: \"if_required\""));
    }
}
