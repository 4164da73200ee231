use chrono::NaiveDateTime;
use clap::Args;
use rust_decimal::Decimal;
use vise_cards::cards::{
    parse_purchase_date, CardServiceError, CardTier, EligibilityRequest, InvalidInput,
    PurchaseContext, PurchaseQuote, Verdict,
};
use vise_cards::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct EligibilityArgs {
    /// Requested card tier (Classic, Gold, Platinum, Black, White)
    #[arg(long)]
    pub(crate) tier: CardTier,
    /// Declared monthly income in USD
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) income: Decimal,
    /// Applicant is enrolled in the membership program
    #[arg(long)]
    pub(crate) member: bool,
    /// Country of residence
    #[arg(long)]
    pub(crate) country: String,
}

#[derive(Args, Debug)]
pub(crate) struct PurchaseArgs {
    /// Card tier held by the client
    #[arg(long)]
    pub(crate) tier: CardTier,
    /// Purchase amount in USD
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) amount: Decimal,
    /// Purchase date (RFC 3339, YYYY-MM-DDTHH:MM:SS or YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub(crate) date: NaiveDateTime,
    /// Country the purchase is made from
    #[arg(long)]
    pub(crate) purchase_country: String,
    /// Client's country of residence
    #[arg(long)]
    pub(crate) client_country: String,
}

fn parse_date_arg(raw: &str) -> Result<NaiveDateTime, String> {
    parse_purchase_date(raw).map_err(|err| err.to_string())
}

pub(crate) fn run_eligibility(args: EligibilityArgs) -> Result<(), AppError> {
    let request = EligibilityRequest {
        tier: args.tier,
        monthly_income: args.income,
        is_member: args.member,
        country: args.country,
    };

    println!("{}", render_eligibility(&request, &request.evaluate()));
    Ok(())
}

pub(crate) fn run_purchase(args: PurchaseArgs) -> Result<(), AppError> {
    let context = purchase_context(args)?;
    println!("{}", render_purchase(&context));
    Ok(())
}

fn purchase_context(args: PurchaseArgs) -> Result<PurchaseContext, AppError> {
    if args.amount <= Decimal::ZERO {
        return Err(CardServiceError::from(InvalidInput::NonPositiveAmount(args.amount)).into());
    }

    Ok(PurchaseContext {
        tier: args.tier,
        amount: args.amount,
        purchase_date: args.date,
        purchase_country: args.purchase_country,
        client_country: args.client_country,
    })
}

fn render_eligibility(request: &EligibilityRequest, verdict: &Verdict) -> String {
    let status = if verdict.is_approved() {
        "ELIGIBLE"
    } else {
        "REJECTED"
    };
    format!(
        "{} card for {} resident: {status} ({})",
        request.tier,
        request.country,
        verdict.message()
    )
}

fn render_purchase(context: &PurchaseContext) -> String {
    let verdict = context.authorize();
    if !verdict.is_approved() {
        return format!("Purchase REJECTED: {}", verdict.message());
    }

    let quote = PurchaseQuote::price(context.amount, &context.discount());
    let mut lines = vec![
        format!(
            "Purchase APPROVED for {} card ({} on {})",
            context.tier,
            context.purchase_country,
            context.purchase_date.format("%A %Y-%m-%d")
        ),
        format!("- original amount: {}", quote.original_amount),
        format!("- discount applied: {}", quote.discount_applied),
        format!("- final amount: {}", quote.final_amount),
    ];
    match quote.benefit {
        Some(label) => lines.push(format!("- benefit: {label}")),
        None => lines.push("- benefit: none".to_string()),
    }
    lines.join("\n")
}
