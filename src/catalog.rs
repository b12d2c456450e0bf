//! Canonical catalog: the company universe and the hierarchical chart of
//! accounts, seeded once at bootstrap.
//!
//! The chart mirrors the balance-sheet structure of the source statements:
//! leaf accounts roll up into section totals, section totals into
//! TOTAL_ASSETS on the asset side and TOTAL_RESOURCES on the claims side.
//! Accounts are inserted in one pass and parents wired in a second, so seed
//! order never matters.

use serde::Serialize;

use crate::db::{DbError, FactStore, PeriodRange};

#[derive(Debug, Clone, Copy)]
pub struct CompanySeed {
    pub ticker: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct AccountSeed {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub parent: Option<&'static str>,
}

const fn co(ticker: &'static str, name: &'static str, description: &'static str) -> CompanySeed {
    CompanySeed { ticker, name, description }
}

const fn acct(
    code: &'static str,
    name: &'static str,
    description: &'static str,
    parent: Option<&'static str>,
) -> AccountSeed {
    AccountSeed { code, name, description, parent }
}

pub const COMPANIES: &[CompanySeed] = &[
    co("KCHOL", "Koç Holding A.Ş.", "Leading Turkish conglomerate with diversified holdings across industries."),
    co("SAHOL", "Sabancı Holding A.Ş.", "Major Turkish conglomerate active in finance, energy, and retail sectors."),
    co("THYAO", "Türk Hava Yolları A.Ş.", "Flag carrier airline of Turkey, operating worldwide flights."),
    co("TUPRS", "Türkiye Petrol Rafinerileri A.Ş.", "Turkey's largest oil refiner, producing fuel and petrochemical products."),
    co("TCELL", "Turkcell A.Ş.", "Leading mobile operator in Turkey offering telecommunications services."),
    co("TTKOM", "Türk Telekom A.Ş.", "Integrated telecom operator providing fixed-line, mobile, and internet services."),
    co("SISE", "Türkiye Şişe ve Cam Fabrikaları A.Ş.", "Global glass manufacturer with products in flat and glassware sectors."),
    co("TTRAK", "Türk Traktör ve Ziraat Makineleri A.Ş.", "Leading tractor and agricultural machinery manufacturer in Turkey."),
    co("FROTO", "Ford Otomotiv Sanayi A.Ş.", "Automotive manufacturer and joint venture producing Ford-branded vehicles."),
    co("TOASO", "Tofaş Türk Otomobil Fabrikası A.Ş.", "Turkish automotive manufacturer producing Fiat-based passenger vehicles."),
];

const CUR: Option<&str> = Some("TOTAL_CURRENT_ASSETS");
const FIX: Option<&str> = Some("TOTAL_FIXED_ASSETS");
const STL: Option<&str> = Some("TOTAL_SHORT_TERM_LIABILITIES");
const LTL: Option<&str> = Some("TOTAL_LONG_TERM_LIABILITIES");
const OWN: Option<&str> = Some("EQUITY_ATTRIBUTABLE_TO_OWNERS_OF_PARENT");

pub const ACCOUNTS: &[AccountSeed] = &[
    // ---- Current assets -------------------------------------------------
    acct("CASH_AND_CASH_EQUIVALENTS", "Cash and Cash Equivalents", "Cash on hand, bank balances, and highly liquid short-term investments with original maturities of three months or less.", CUR),
    acct("CASH_ACCOUNTS_REAL_ESTATE_PROJECTS", "Cash Accounts for Real Estate Projects", "Cash accounts specifically established for financing and operations of real estate development projects.", CUR),
    acct("FINANCIAL_INVESTMENTS_CURRENT", "Current Financial Investments", "Financial investments expected to be realized within one year, such as marketable securities and short-term deposits.", CUR),
    acct("CURRENT_PLEDGED_FINANCIAL_ASSETS", "Current Pledged Financial Assets", "Financial assets provided as collateral for obligations, expected to be released within one year.", CUR),
    acct("CURRENT_TRADE_RECEIVABLES", "Current Trade Receivables", "Trade receivables expected to be collected within one year.", CUR),
    acct("CURRENT_FINANCIAL_SECTOR_RECEIVABLES", "Current Receivables from Financial Sector Activities", "Receivables from banking and financial services operations due within one year.", CUR),
    acct("CENTRAL_BANK_OF_TURKEY_ACCOUNT", "Central Bank of the Republic of Turkey Account", "Cash balances held at the Central Bank of the Republic of Turkey.", CUR),
    acct("CURRENT_OTHER_RECEIVABLES", "Current Other Receivables", "Various receivables expected to be settled within one year that are not separately classified elsewhere.", CUR),
    acct("CURRENT_ASSETS_FROM_CUSTOMER_CONTRACTS", "Current Assets from Customer Contracts", "Contract assets arising from customer agreements, expected to be realized within one year.", CUR),
    acct("CURRENT_FINANCIAL_ASSETS_FROM_CONCESSION_CONTRACTS", "Current Financial Assets Related to Concession Contracts", "Financial assets from concession agreements due within one year.", CUR),
    acct("CURRENT_DERIVATIVE_INSTRUMENTS", "Current Derivative Instruments", "Derivative financial instruments held for hedging or trading with maturities within one year.", CUR),
    acct("CURRENT_INVENTORIES", "Current Inventories", "Inventories expected to be sold or used within one year.", CUR),
    acct("CURRENT_INVENTORIES_IN_PROGRESS", "Current Inventories in Progress", "Work-in-progress inventories related to ongoing operations.", CUR),
    acct("CURRENT_BIOLOGICAL_ASSETS", "Current Biological Assets", "Biological assets such as livestock or crops expected to be harvested or sold within one year.", CUR),
    acct("CURRENT_PREPAID_EXPENSES", "Current Prepaid Expenses", "Prepayments for expenses that will be recognized within one year.", CUR),
    acct("CURRENT_DEFERRED_INSURANCE_PRODUCTION_COSTS", "Current Deferred Insurance Production Costs", "Costs incurred for insurance production activities that are deferred and amortized within one year.", CUR),
    acct("CURRENT_TAX_ASSETS", "Current Tax Assets", "Assets related to current period income taxes, including refundable tax credits.", CUR),
    acct("CURRENT_NON_CASH_FREELY_USABLE_COLLATERALS", "Current Non-cash Freely Usable Collaterals", "Non-cash collateral assets available for use within one year.", CUR),
    acct("OTHER_CURRENT_ASSETS", "Other Current Assets", "Various current assets not separately classified elsewhere.", CUR),
    acct("CURRENT_ASSETS_HELD_FOR_SALE", "Current Assets Held for Sale", "Assets classified as held for sale when sale is highly probable within one year.", CUR),
    acct("CURRENT_ASSETS_HELD_FOR_DISTRIBUTION_TO_OWNERS", "Current Assets Held for Distribution to Owners", "Assets intended for distribution directly to owners within one year.", CUR),
    acct("TOTAL_CURRENT_ASSETS", "Total Current Assets", "Assets expected to be converted to cash or consumed within one year, including cash, receivables, and inventory.", Some("TOTAL_ASSETS")),
    // ---- Fixed assets ---------------------------------------------------
    acct("FINANCIAL_INVESTMENTS_FIXED", "Fixed Financial Investments", "Long-term financial investments held for more than one year, such as equity holdings and debt instruments.", FIX),
    acct("FIXED_INVESTMENTS_IN_ASSOCIATES_JOINT_VENTURES_AND_SUBSIDIARIES", "Investments in Associates, Joint Ventures, and Subsidiaries (Fixed)", "Long-term investments in associates, joint ventures, and subsidiaries accounted for under the equity method.", FIX),
    acct("FIXED_TRADE_RECEIVABLES", "Fixed Trade Receivables", "Trade receivables expected to be collected beyond one year.", FIX),
    acct("FIXED_FINANCIAL_SECTOR_RECEIVABLES", "Fixed Receivables from Financial Sector Activities", "Receivables from banking and financial services operations due beyond one year.", FIX),
    acct("FIXED_OTHER_RECEIVABLES", "Fixed Other Receivables", "Various receivables expected to be settled beyond one year that are not separately classified elsewhere.", FIX),
    acct("FIXED_ASSETS_FROM_CUSTOMER_CONTRACTS", "Fixed Assets from Customer Contracts", "Contract assets arising from customer agreements expected to be realized beyond one year.", FIX),
    acct("FIXED_FINANCIAL_ASSETS_FROM_CONCESSION_CONTRACTS", "Fixed Financial Assets Related to Concession Contracts", "Financial assets arising from concession agreements with maturities exceeding one year.", FIX),
    acct("FIXED_DERIVATIVE_INSTRUMENTS", "Fixed Derivative Instruments", "Derivative financial instruments held for hedging or investment with maturities beyond one year.", FIX),
    acct("FIXED_INVENTORIES", "Fixed Inventories", "Inventories held for long-term projects or purposes exceeding one year.", FIX),
    acct("FIXED_EQUITY_METHOD_INVESTMENTS", "Equity Method Investments (Fixed)", "Long-term investments in which the equity method is applied, such as significant influence stakes.", FIX),
    acct("FIXED_BIOLOGICAL_ASSETS", "Fixed Biological Assets", "Biological assets such as crops and livestock held for more than one year.", FIX),
    acct("FIXED_INVESTMENT_PROPERTIES", "Investment Properties (Fixed)", "Properties held to earn rentals or for capital appreciation rather than use in production.", FIX),
    acct("FIXED_INVESTMENT_PROPERTIES_IN_PROGRESS", "Investment Properties in Progress (Fixed)", "Investment properties under development or construction.", FIX),
    acct("FIXED_TANGIBLE_ASSETS", "Fixed Tangible Assets", "Physical assets held for use in production or supply of goods and services, with useful life beyond one year.", FIX),
    acct("FIXED_RIGHT_OF_USE_ASSETS", "Right-of-Use Assets (Fixed)", "Assets representing a lessee's right to use an underlying asset for the lease term.", FIX),
    acct("FIXED_INTANGIBLE_ASSETS", "Fixed Intangible Assets", "Non-physical assets with long-term benefits, such as patents, trademarks, and goodwill.", FIX),
    acct("FIXED_PREPAID_EXPENSES", "Fixed Prepaid Expenses", "Prepayments for expenses that will be recognized beyond one year.", FIX),
    acct("FIXED_DEFERRED_TAX_ASSETS", "Fixed Deferred Tax Assets", "Deferred tax assets expected to be realized beyond one year arising from temporary differences.", FIX),
    acct("FIXED_CURRENT_PERIOD_TAX_ASSETS", "Current Period Tax Assets (Fixed)", "Non-current assets related to current period tax refunds or credits realized beyond one year.", FIX),
    acct("FIXED_NON_CASH_FREELY_USABLE_COLLATERALS", "Fixed Non-cash Freely Usable Collaterals", "Non-cash collateral assets with maturities beyond one year that can be freely used or liquidated.", FIX),
    acct("OTHER_FIXED_ASSETS", "Other Fixed Assets", "Various fixed assets not classified elsewhere, expected to provide economic benefits beyond one year.", FIX),
    acct("TOTAL_FIXED_ASSETS", "Total Fixed Assets", "The sum of all non-current assets held by the company, including tangible, intangible, and long-term financial assets.", Some("TOTAL_ASSETS")),
    acct("TOTAL_ASSETS", "Total Assets", "The sum of all assets owned by the company, including current and non-current assets; excludes liabilities.", None),
    // ---- Short-term liabilities -----------------------------------------
    acct("SHORT_TERM_FINANCIAL_BORROWINGS", "Short-term Financial Borrowings", "Short-term obligations from debt instruments such as bank loans and commercial paper due within one year.", STL),
    acct("SHORT_TERM_OTHER_FINANCIAL_LIABILITIES", "Other Short-term Financial Liabilities", "Various short-term financial obligations not classified as borrowings or derivatives.", STL),
    acct("SHORT_TERM_TRADE_PAYABLES", "Short-term Trade Payables", "Amounts owed to suppliers for goods and services, to be settled within one year.", STL),
    acct("SHORT_TERM_FINANCIAL_SECTOR_LIABILITIES", "Short-term Liabilities from Financial Sector Activities", "Obligations arising from banking and financial services operations, due within one year.", STL),
    acct("SHORT_TERM_EMPLOYEE_BENEFITS_LIABILITIES", "Short-term Employee Benefits Liabilities", "Obligations to employees for salaries, pensions, and other benefits payable within one year.", STL),
    acct("SHORT_TERM_OTHER_BORROWINGS", "Other Short-term Borrowings", "Various non-financial obligations expected to be settled within one year.", STL),
    acct("SHORT_TERM_LIABILITIES_FROM_CUSTOMER_CONTRACTS", "Short-term Liabilities from Customer Contracts", "Unearned revenue and other contract liabilities expected to be recognized as revenue within one year.", STL),
    acct("SHORT_TERM_LIABILITIES_FROM_EQUITY_METHOD_INVESTMENTS", "Short-term Liabilities from Equity Method Investments", "Obligations related to investments accounted for under the equity method, due within one year.", STL),
    acct("SHORT_TERM_DERIVATIVE_LIABILITIES", "Short-term Derivative Liabilities", "Obligations under derivative contracts with maturities within one year.", STL),
    acct("SHORT_TERM_GOVERNMENT_GRANTS_AND_AIDS", "Short-term Government Grants and Aids", "Liabilities recognized for government grants and aid to be repaid or fulfilled within one year.", STL),
    acct("SHORT_TERM_DEFERRED_INCOME", "Short-term Deferred Income", "Advance payments received for goods or services expected to be delivered within one year.", STL),
    acct("SHORT_TERM_INCOME_TAX_LIABILITIES", "Short-term Income Tax Liabilities", "Income taxes payable to tax authorities for the current period, due within one year.", STL),
    acct("SHORT_TERM_PROVISIONS", "Short-term Provisions", "Reserves for liabilities such as warranties, restructurings, and legal claims settled within one year.", STL),
    acct("OTHER_SHORT_TERM_LIABILITIES", "Other Short-term Liabilities", "Various short-term obligations not classified elsewhere.", STL),
    acct("SHORT_TERM_LIABILITIES_RELATING_TO_ASSETS_CLASSIFIED_AS_HELD_FOR_SALE", "Short-term Liabilities Relating to Assets Classified as Held for Sale", "Obligations directly associated with assets classified as held for sale.", STL),
    acct("SHORT_TERM_LIABILITIES_RELATING_TO_ASSETS_HELD_FOR_DISTRIBUTION_TO_OWNERS", "Short-term Liabilities Relating to Assets Held for Distribution to Owners", "Obligations directly associated with assets held for distribution to owners.", STL),
    acct("TOTAL_SHORT_TERM_LIABILITIES", "Total Short-term Liabilities", "The sum of all liabilities expected to be settled within one year.", Some("TOTAL_LIABILITIES")),
    // ---- Long-term liabilities ------------------------------------------
    acct("LONG_TERM_FINANCIAL_BORROWINGS", "Long-term Financial Borrowings", "Obligations from debt instruments such as bonds and loans maturing beyond one year.", LTL),
    acct("LONG_TERM_OTHER_FINANCIAL_LIABILITIES", "Other Long-term Financial Liabilities", "Non-borrowing financial obligations due beyond one year, such as lease liabilities.", LTL),
    acct("LONG_TERM_TRADE_PAYABLES", "Long-term Trade Payables", "Amounts owed to suppliers for goods and services payable after more than one year.", LTL),
    acct("LONG_TERM_FINANCIAL_SECTOR_LIABILITIES", "Long-term Liabilities from Financial Sector Activities", "Obligations arising from banking and financial services operations due beyond one year.", LTL),
    acct("LONG_TERM_EMPLOYEE_BENEFITS_LIABILITIES", "Long-term Employee Benefits Liabilities", "Obligations to employees for pensions and other benefits payable after one year.", LTL),
    acct("LONG_TERM_OTHER_BORROWINGS", "Other Long-term Borrowings", "Various non-financial obligations expected to be settled after more than one year.", LTL),
    acct("LONG_TERM_LIABILITIES_FROM_CUSTOMER_CONTRACTS", "Long-term Liabilities from Customer Contracts", "Contract liabilities expected to be recognized as revenue after one year.", LTL),
    acct("LONG_TERM_GOVERNMENT_GRANTS_AND_AIDS", "Long-term Government Grants and Aids", "Deferred liabilities for government grants repayable or fulfilled beyond one year.", LTL),
    acct("LONG_TERM_LIABILITIES_FROM_EQUITY_METHOD_INVESTMENTS", "Long-term Liabilities from Equity Method Investments", "Obligations related to equity-accounted investments due after one year.", LTL),
    acct("LONG_TERM_DERIVATIVE_LIABILITIES", "Long-term Derivative Liabilities", "Obligations under derivative contracts such as swaps maturing beyond one year.", LTL),
    acct("LONG_TERM_DEFERRED_INCOME", "Long-term Deferred Income", "Advance payments received for goods or services to be delivered after one year.", LTL),
    acct("LONG_TERM_PROVISIONS", "Long-term Provisions", "Reserves for liabilities such as warranties or restructurings expected to be settled after one year.", LTL),
    acct("LONG_TERM_CURRENT_PERIOD_TAX_LIABILITIES", "Current Period Tax Liabilities (Long-term)", "Tax liabilities for the current period expected to be settled beyond one year.", LTL),
    acct("LONG_TERM_DEFERRED_TAX_LIABILITIES", "Deferred Tax Liabilities (Long-term)", "Tax obligations deferred to future periods, expected to be settled after one year.", LTL),
    acct("OTHER_LONG_TERM_LIABILITIES", "Other Long-term Liabilities", "Various long-term obligations not classified elsewhere.", LTL),
    acct("TOTAL_LONG_TERM_LIABILITIES", "Total Long-term Liabilities", "The sum of all liabilities due beyond one year.", Some("TOTAL_LIABILITIES")),
    acct("TOTAL_LIABILITIES", "Total Liabilities", "The sum of all financial obligations owed; includes short- and long-term liabilities, excludes equity.", Some("TOTAL_RESOURCES")),
    // ---- Equity ---------------------------------------------------------
    acct("EQUITY_ATTRIBUTABLE_TO_OWNERS_OF_PARENT", "Equity Attributable to Owners of the Parent", "The portion of total equity that is attributable to the parent company's shareholders.", Some("TOTAL_EQUITY")),
    acct("PAID_IN_CAPITAL", "Paid-in Capital", "Capital contributed by shareholders in exchange for shares at issuance.", OWN),
    acct("CAPITAL_ADJUSTMENT_DIFFERENCES", "Capital Adjustment Differences", "Adjustments to share capital arising from inflation, currency translation, or statutory revaluations.", OWN),
    acct("MERGER_EQUALISATION_ACCOUNT", "Merger Equalisation Account", "Adjustment account used to eliminate differences arising from mergers under statutory accounting rules.", OWN),
    acct("ADDITIONAL_PAID_IN_CAPITAL", "Additional Paid-in Capital", "Amounts received from shareholders in excess of the nominal value of shares issued.", OWN),
    acct("CAPITAL_ADVANCE", "Capital Advance", "Funds received from shareholders for future capital increases or share issuances.", OWN),
    acct("TREASURY_SHARES", "Treasury Shares", "Shares repurchased by the company, presented as a deduction from total equity.", OWN),
    acct("RECIPROCAL_INVESTMENT_CAPITAL_ADJUSTMENT", "Reciprocal Investment Capital Adjustment", "Elimination of capital accounts in cases of mutual shareholding between group companies.", OWN),
    acct("SHARE_PREMIUMS", "Share Premiums (Discounts)", "Premiums or discounts arising on issuance of shares above or below their nominal value.", OWN),
    acct("EFFECT_OF_BUSINESS_COMBINATIONS_UNDER_COMMON_CONTROL", "Effect of Business Combinations under Common Control", "Equity adjustments arising from mergers or acquisitions between entities under common control.", OWN),
    acct("SHARE_BASED_PAYMENTS", "Share-based Payments", "Equity instruments granted to employees or other parties as compensation or incentives.", OWN),
    acct("ACCUMULATED_OTHER_COMPREHENSIVE_INCOME_NOT_RECLASSIFIED", "Accumulated Other Comprehensive Income, Not Reclassified", "Cumulative OCI items that will not be reclassified to profit or loss in subsequent periods.", OWN),
    acct("ACCUMULATED_OTHER_COMPREHENSIVE_INCOME_RECLASSIFIED", "Accumulated Other Comprehensive Income, Reclassified", "Cumulative OCI items that may be reclassified to profit or loss when specific conditions are met.", OWN),
    acct("RESTRICTED_RESERVES_APPROPRIATED_FROM_PROFIT", "Restricted Reserves Appropriated from Profit", "Portions of profit set aside as statutory or voluntary reserves, not distributable as dividends.", OWN),
    acct("OTHER_EQUITY_INTERESTS", "Other Equity Interests", "Equity stakes held by non-owners or third parties, not classified as non-controlling interests.", OWN),
    acct("OTHER_RESERVES", "Other Reserves", "Equity reserves not separately classified, including statutory and discretionary reserves.", OWN),
    acct("DIVIDEND_ADVANCES_PAID_NET", "Dividend Advances Paid (Net)", "Advances paid on dividends, net of any repayment or offsets.", OWN),
    acct("RETAINED_EARNINGS", "Retained Earnings", "Cumulative net profit or loss retained in the business, less dividends distributed.", OWN),
    acct("PROFIT_OR_LOSS_FOR_THE_PERIOD", "Profit or Loss for the Period", "Net result recognized in the current reporting period.", OWN),
    acct("NON_CONTROLLING_INTERESTS", "Non-controlling Interests", "Equity in subsidiaries not attributable to the parent company's shareholders.", Some("TOTAL_EQUITY")),
    acct("TOTAL_EQUITY", "Total Equity", "The residual interest in the assets of the entity after deducting liabilities.", Some("TOTAL_RESOURCES")),
    acct("TOTAL_RESOURCES", "Total Resources", "The sum of total equity and total liabilities, representing all claims on the entity's assets.", None),
    acct("NET_FOREIGN_CURRENCY_POSITION_INCLUDING_HEDGE", "Net Foreign Currency Position Including Hedge", "Net exposure to foreign currency risks, including the effect of hedging instruments.", None),
];

/// Outcome of a seeding pass.
#[derive(Debug, Default, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedSummary {
    pub companies: usize,
    pub accounts: usize,
    pub periods_inserted: usize,
}

/// Upsert the company universe, the chart of accounts (two-phase parent
/// wiring), and the exhaustive period table. Idempotent.
pub fn seed(store: &FactStore, range: &PeriodRange) -> Result<SeedSummary, DbError> {
    for company in COMPANIES {
        store.upsert_company(company.ticker, company.name, company.description)?;
    }

    for account in ACCOUNTS {
        store.upsert_account(account.code, account.name, account.description)?;
    }
    for account in ACCOUNTS {
        if let Some(parent) = account.parent {
            store.link_parent(account.code, parent)?;
        }
    }

    let periods_inserted = store.fill_periods(range)?;

    Ok(SeedSummary {
        companies: COMPANIES.len(),
        accounts: ACCOUNTS.len(),
        periods_inserted,
    })
}
