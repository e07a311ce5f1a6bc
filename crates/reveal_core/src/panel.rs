//! Authored content for tab panels the upstream renderer leaves empty.

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabPanelSpec {
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
    pub learn_more_url: String,
    pub code: String,
}

/// Panel element id -> descriptor.
///
/// The ids are generated by the upstream component library, so the table is
/// data handed to the runtime rather than something the runtime derives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabPanelCatalog {
    panels: BTreeMap<String, TabPanelSpec>,
}

impl TabPanelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_panel(mut self, panel_id: impl Into<String>, spec: TabPanelSpec) -> Self {
        self.insert(panel_id, spec);
        self
    }

    pub fn insert(&mut self, panel_id: impl Into<String>, spec: TabPanelSpec) {
        self.panels.insert(panel_id.into(), spec);
    }

    pub fn get(&self, panel_id: &str) -> Option<&TabPanelSpec> {
        self.panels.get(panel_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TabPanelSpec)> {
        self.panels.iter().map(|(id, spec)| (id.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// The integration and usage-billing panels shipped with the landing page.
    pub fn builtin() -> Self {
        const CHECKOUT_FEATURES: [&str; 4] = [
            "Secure & Simple Checkouts",
            "Integrated Customer Portal",
            "Granular & Reliable Webhook Handler",
            "Global Merchant of Record",
        ];

        Self::new()
            .with_panel(
                "radix-_R_2lbriv9fd5ulb_-content-BetterAuth",
                TabPanelSpec {
                    title: "BetterAuth Adapter".to_string(),
                    description: "Payments and Checkouts made dead simple with BetterAuth"
                        .to_string(),
                    features: CHECKOUT_FEATURES.iter().map(|f| f.to_string()).collect(),
                    learn_more_url: "docs/integrate/sdk/adapters/better-auth.html".to_string(),
                    code: BETTER_AUTH_SAMPLE.to_string(),
                },
            )
            .with_panel(
                "radix-_R_2lbriv9fd5ulb_-content-TypeScript",
                TabPanelSpec {
                    title: "TypeScript Adapter".to_string(),
                    description: "Payments and Checkouts made dead simple with TypeScript"
                        .to_string(),
                    features: CHECKOUT_FEATURES.iter().map(|f| f.to_string()).collect(),
                    learn_more_url: "docs/api-reference/checkouts/create-session.html"
                        .to_string(),
                    code: TYPESCRIPT_SAMPLE.to_string(),
                },
            )
            .with_panel(
                "radix-_R_35briv9fd5ulb_-content-Delta Time",
                TabPanelSpec {
                    title: "Delta Time Strategy".to_string(),
                    description: "Bill your customers for the time it takes to execute code on your infrastructure".to_string(),
                    features: vec![
                        "Precise measurements of execution time".to_string(),
                        "Bring your own time-resolver".to_string(),
                    ],
                    learn_more_url: "docs/features/usage-based-billing/ingestion-strategies/delta-time-strategy.html".to_string(),
                    code: DELTA_TIME_SAMPLE.to_string(),
                },
            )
            .with_panel(
                "radix-_R_35briv9fd5ulb_-content-Custom Ingestion",
                TabPanelSpec {
                    title: "Custom Ingestion Strategy".to_string(),
                    description: "Manually ingest data from your application to bill your customers"
                        .to_string(),
                    features: vec![
                        "Manually ingest usage data".to_string(),
                        "Use any custom metadata".to_string(),
                        "Support for batch ingestion".to_string(),
                    ],
                    learn_more_url: "https://github.com/polarsource/polar-ingestion".to_string(),
                    code: CUSTOM_INGESTION_SAMPLE.to_string(),
                },
            )
    }
}

const CHECK_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class="h-4 w-4 text-blue-500"><path d="M20 6 9 17l-5-5"></path></svg>"#;
const ARROW_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class="h-4 w-4"><path d="M5 12h14"></path><path d="m12 5 7 7-7 7"></path></svg>"#;

/// Renders a descriptor into the two-column panel markup used by the page.
pub fn render_panel_html(spec: &TabPanelSpec) -> String {
    let mut features = String::new();
    for feature in &spec.features {
        let _ = write!(
            features,
            r#"<li class="flex flex-row items-center gap-x-2">{CHECK_ICON}<p class="text-sm">{}</p></li>"#,
            escape_text(feature)
        );
    }

    format!(
        concat!(
            r#"<div class="flex w-full flex-col-reverse items-start justify-between gap-8 overflow-hidden rounded-3xl bg-gray-50 p-6 dark:bg-polar-900 lg:flex-row lg:gap-0 lg:p-0">"#,
            r#"<div class="flex flex-col gap-y-6 lg:p-8">"#,
            r#"<h2 class="text-2xl">{title}</h2>"#,
            r#"<p class="dark:text-polar-500 text-gray-500">{description}</p>"#,
            r#"<ul class="flex flex-col gap-y-2">{features}</ul>"#,
            r#"<a href="{url}"><button class="inline-flex items-center justify-center gap-2 rounded-full bg-transparent text-blue-500 hover:text-blue-400 transition-colors text-sm font-medium"><span>Learn More</span>{arrow}</button></a>"#,
            r#"</div>"#,
            r#"<div class="flex w-full flex-shrink-0 flex-col overflow-hidden rounded-2xl bg-gradient-to-br from-[#D1AAF8] via-[#C3D6FA] via-60% to-[#C3D6FA] p-4 pl-8 lg:max-w-sm lg:rounded-none lg:rounded-br-3xl lg:p-10 lg:pl-10 xl:max-w-lg">"#,
            r#"<pre class="shiki" style="background-color:transparent;overflow-x:auto"><code class="text-xs text-black">{code}</code></pre>"#,
            r#"</div>"#,
            r#"</div>"#,
        ),
        title = escape_text(&spec.title),
        description = escape_text(&spec.description),
        features = features,
        url = escape_attr(&spec.learn_more_url),
        arrow = ARROW_ICON,
        code = escape_code(&spec.code),
    )
}

/// Code samples only need their angle brackets neutralized.
pub fn escape_code(code: &str) -> String {
    code.replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

const BETTER_AUTH_SAMPLE: &str = r#"import { betterAuth } from "better-auth";
import { polar, checkout, portal, usage, webhooks } from "@polar-sh/better-auth";
import { Polar } from "@polar-sh/sdk";

const client = new Polar({ accessToken: 'xxx' });

const auth = betterAuth({
  // ... Better Auth config
  plugins: [
    polar({
      client,
      createCustomerOnSignUp: true,
      use: [
        checkout(...),
        portal(),
        usage(),
        webhooks(...)
      ],
    })
  ]
});"#;

const TYPESCRIPT_SAMPLE: &str = r#"import { Polar } from "@polar-sh/sdk";

const polar = new Polar({
  accessToken: 'xxx',
});

const checkout = await polar.checkouts.create({
  products: ["<PRODUCT_ID>"]
});

redirect(checkout.url)"#;

const DELTA_TIME_SAMPLE: &str = r#"import { Ingestion } from "@polar-sh/ingestion";
import { DeltaTimeStrategy } from "@polar-sh/ingestion/strategies/DeltaTime";

const nowResolver = () => performance.now();

const deltaTimeIngestion = Ingestion({ accessToken: 'xxx' })
  .strategy(new DeltaTimeStrategy(nowResolver))
  .ingest("execution-time");

export async function GET(request: Request) {
  const start = deltaTimeIngestion.client({
    externalCustomerId: "<USER_ID_FROM_YOUR_DATABASE>",
  });

  const stop = start();
  await sleep(1000);
  const delta = stop();

  return Response.json({ delta });
}"#;

const CUSTOM_INGESTION_SAMPLE: &str = r#"import { Ingestion } from "@polar-sh/ingestion";

await Ingestion({ accessToken: 'xxx' }).ingest([
  {
    name: "<value>",
    externalCustomerId: "<USER_ID_FROM_YOUR_DATABASE>",
    metadata: {
      myProp: "value",
    },
  },
]);"#;
