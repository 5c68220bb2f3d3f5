//! Handlebars helpers available to every template.

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, JsonTruthy, Output, PathAndJson,
    RenderContext, RenderErrorReason, Renderable,
};

pub(crate) fn register(handlebars: &mut Handlebars<'_>) {
    handlebars.register_helper("upper", Box::new(upper_helper));
    handlebars.register_helper("lower", Box::new(lower_helper));
    // The built-in conditionals treat a missing value as false even in
    // strict mode.
    handlebars.register_helper("if", Box::new(StrictIf { positive: true }));
    handlebars.register_helper("unless", Box::new(StrictIf { positive: false }));
}

fn present_param<'a, 'rc>(
    h: &'a Helper<'rc>,
    helper: &'static str,
) -> Result<&'a PathAndJson<'rc>, RenderErrorReason> {
    let param = h
        .param(0)
        .ok_or(RenderErrorReason::ParamNotFoundForIndex(helper, 0))?;
    if param.is_value_missing() {
        return Err(RenderErrorReason::MissingVariable(
            param.relative_path().cloned(),
        ));
    }
    Ok(param)
}

/// First param as text. A missing param or missing value is an error, so
/// helpers stay as strict as plain expressions.
fn string_param(h: &Helper, helper: &'static str) -> Result<String, RenderErrorReason> {
    Ok(present_param(h, helper)?.render())
}

/// `#if` / `#unless` that fail on a missing condition instead of taking
/// the else branch.
#[derive(Clone, Copy)]
struct StrictIf {
    positive: bool,
}

impl HelperDef for StrictIf {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let name = if self.positive { "if" } else { "unless" };
        let param = present_param(h, name)?;
        let include_zero = h
            .hash_get("includeZero")
            .and_then(|v| v.value().as_bool())
            .unwrap_or(false);

        let take_block = param.value().is_truthy(include_zero) == self.positive;
        let branch = if take_block { h.template() } else { h.inverse() };
        match branch {
            Some(t) => t.render(r, ctx, rc, out),
            None => Ok(()),
        }
    }
}

fn upper_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&string_param(h, "upper")?.to_uppercase())?;
    Ok(())
}

fn lower_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&string_param(h, "lower")?.to_lowercase())?;
    Ok(())
}
