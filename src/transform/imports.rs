//! Import path rewriting.
//!
//! Registry sources import each other through `@/registry/<style>/...` and
//! `@/...` paths. These are rewritten to the project's configured aliases.

use regex::{Captures, NoExpand, Regex};
use std::sync::LazyLock;

use crate::config::Aliases;
use crate::transform::{Transform, TransformContext, TransformError};

/// Module specifiers of `from "..."`, `import "..."`, `import("...")` and
/// `require("...")`.
static SPECIFIER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\bfrom\s*|\bimport\s*\(\s*|\bimport\s+|\brequire\s*\(\s*)(["'])([^"'\n]+)["']"#)
        .expect("specifier regex must compile")
});

/// `import type ...` declarations, which plain JavaScript cannot hold.
static TYPE_IMPORT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?ms)^import\s+type\s.*?\bfrom\s*["'][^"'\n]*["'];?[ \t]*\r?\n?"#)
        .expect("type import regex must compile")
});

static REGISTRY_UI_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@/registry/(.+)/ui").expect("registry ui regex must compile"));

static REGISTRY_COMPONENTS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@/registry/(.+)/components").expect("registry components regex must compile")
});

static REGISTRY_LIB_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@/registry/(.+)/lib").expect("registry lib regex must compile")
});

static REGISTRY_HOOKS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@/registry/(.+)/hooks").expect("registry hooks regex must compile")
});

static REGISTRY_ROOT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@/registry/[^/]+").expect("registry root regex must compile")
});

/// Style segment assumed for sources fetched from a URL or file.
const REMOTE_STYLE: &str = "new-york";

const UTILS_SPECIFIER: &str = "@/lib/utils";

/// Rewrites import paths to the project's aliases.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportsTransform;

impl Transform for ImportsTransform {
    fn name(&self) -> &'static str {
        "imports"
    }

    fn apply(&self, source: &str, ctx: &TransformContext<'_>) -> Result<String, TransformError> {
        let aliases = &ctx.config.aliases;

        let rewritten = SPECIFIER_REGEX.replace_all(source, |caps: &Captures<'_>| {
            let quote = &caps[2];
            format!(
                "{}{quote}{}{quote}",
                &caps[1],
                rewrite_specifier(&caps[3], aliases, ctx.is_remote)
            )
        });

        if ctx.is_non_typed() {
            return Ok(TYPE_IMPORT_REGEX.replace_all(&rewritten, "").into_owned());
        }
        Ok(rewritten.into_owned())
    }
}

/// Map one module specifier to the project's aliases.
///
/// Specifiers outside `@/` are returned unchanged. For remote sources,
/// every `@/` path is treated as coming from the registry.
pub fn rewrite_specifier(specifier: &str, aliases: &Aliases, is_remote: bool) -> String {
    if specifier == UTILS_SPECIFIER {
        return aliases.utils.clone();
    }

    let Some(rest) = specifier.strip_prefix("@/") else {
        return specifier.to_string();
    };

    let specifier = if is_remote && !rest.starts_with("registry/") {
        format!("@/registry/{REMOTE_STYLE}/{rest}")
    } else {
        specifier.to_string()
    };

    if !specifier.starts_with("@/registry/") {
        let root = alias_root(&aliases.components);
        return format!("{root}/{rest}");
    }

    let is_registry_utils = specifier
        .strip_prefix("@/registry/")
        .and_then(|path| path.split_once('/'))
        .is_some_and(|(_, path)| path == "lib/utils");
    if is_registry_utils {
        return aliases.utils.clone();
    }

    let routes: [(&Regex, String); 4] = [
        (&REGISTRY_UI_REGEX, aliases.ui()),
        (&REGISTRY_COMPONENTS_REGEX, aliases.components.clone()),
        (&REGISTRY_LIB_REGEX, aliases.lib()),
        (&REGISTRY_HOOKS_REGEX, aliases.hooks()),
    ];
    for (pattern, alias) in &routes {
        if pattern.is_match(&specifier) {
            return pattern.replace(&specifier, NoExpand(alias)).into_owned();
        }
    }

    REGISTRY_ROOT_REGEX
        .replace(&specifier, NoExpand(&aliases.components))
        .into_owned()
}

/// First segment of an alias (`@` for `@/components`).
fn alias_root(alias: &str) -> &str {
    alias.split('/').next().unwrap_or(alias)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComponentsConfig;

    fn config(aliases: &str) -> ComponentsConfig {
        serde_json::from_str(&format!(r#"{{ "aliases": {aliases} }}"#)).unwrap()
    }

    fn custom() -> ComponentsConfig {
        config(
            r#"{ "components": "~/components", "utils": "~/lib/utils", "ui": "~/ui", "hooks": "~/hooks" }"#,
        )
    }

    fn run(source: &str, config: &ComponentsConfig, remote: bool) -> String {
        let ctx = TransformContext::new("x.tsx", config).remote(remote);
        ImportsTransform.apply(source, &ctx).unwrap()
    }

    #[test]
    fn rewrites_registry_paths() {
        let config = custom();
        let source = r#"import * as React from "react"
import { Button } from "@/registry/new-york/ui/button"
import { Card } from "@/registry/new-york/components/card"
import { useMobile } from "@/registry/new-york/hooks/use-mobile"
import { cn } from "@/lib/utils"
import { Other } from "@/registry/new-york/example/other"
"#;
        let expected = r#"import * as React from "react"
import { Button } from "~/ui/button"
import { Card } from "~/components/card"
import { useMobile } from "~/hooks/use-mobile"
import { cn } from "~/lib/utils"
import { Other } from "~/components/example/other"
"#;
        assert_eq!(run(source, &config, false), expected);
    }

    #[test]
    fn rewrites_plain_alias_root() {
        let config = custom();
        assert_eq!(
            run(r#"import { x } from "@/app/data";"#, &config, false),
            r#"import { x } from "~/app/data";"#
        );
    }

    #[test]
    fn remote_sources_route_through_registry() {
        let config = custom();
        assert_eq!(
            run(r#"import { Button } from "@/components/ui/button""#, &config, true),
            r#"import { Button } from "~/ui/button""#
        );
    }

    #[test]
    fn leaves_packages_and_relative_paths() {
        let config = custom();
        let source = "import { clsx } from 'clsx'\nimport './styles.css'\nconst x = require(\"../x\")\n";
        assert_eq!(run(source, &config, false), source);
    }

    #[test]
    fn dynamic_imports_are_rewritten() {
        let config = custom();
        assert_eq!(
            run(r#"const Chart = lazy(() => import("@/registry/new-york/ui/chart"))"#, &config, false),
            r#"const Chart = lazy(() => import("~/ui/chart"))"#
        );
    }

    #[test]
    fn js_projects_lose_type_imports() {
        let mut config = ComponentsConfig::default();
        config.tsx = false;
        let source = "import type { VariantProps } from \"class-variance-authority\"\nimport { cva } from \"class-variance-authority\"\n";
        assert_eq!(
            run(source, &config, false),
            "import { cva } from \"class-variance-authority\"\n"
        );
    }

    #[test]
    fn default_aliases_keep_registry_layout() {
        let aliases = Aliases::default();
        assert_eq!(
            rewrite_specifier("@/registry/default/ui/dialog", &aliases, false),
            "@/components/ui/dialog"
        );
        assert_eq!(
            rewrite_specifier("@/registry/default/lib/utils", &aliases, false),
            "@/lib/utils"
        );
        assert_eq!(rewrite_specifier("react", &aliases, true), "react");
    }
}
