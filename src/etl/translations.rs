//! Static translation table: Turkish balance-sheet line labels as they appear
//! in the source workbooks, mapped to canonical account codes.
//!
//! The table is authoritative: labels without an entry are intentionally
//! dropped during loading. Lookups are exact after whitespace trimming.

use std::collections::HashMap;
use std::sync::OnceLock;

pub const ACCOUNT_TRANSLATIONS: &[(&str, &str)] = &[
    // Current assets
    ("Nakit ve Nakit Benzerleri", "CASH_AND_CASH_EQUIVALENTS"),
    ("Gayrimenkul Projeleri Kapsamında Açılan Nakit Hesapları", "CASH_ACCOUNTS_REAL_ESTATE_PROJECTS"),
    ("Finansal Yatırımlar (Dönen)", "FINANCIAL_INVESTMENTS_CURRENT"),
    ("Teminata Verilen Finansal Varlıklar", "CURRENT_PLEDGED_FINANCIAL_ASSETS"),
    ("Ticari Alacaklar (Dönen)", "CURRENT_TRADE_RECEIVABLES"),
    ("Finans Sektörü Faaliyetlerinden Alacaklar (Dönen)", "CURRENT_FINANCIAL_SECTOR_RECEIVABLES"),
    ("Türkiye Cumhuriyet Merkez Bankası Hesabı", "CENTRAL_BANK_OF_TURKEY_ACCOUNT"),
    ("Diğer Alacaklar (Dönen)", "CURRENT_OTHER_RECEIVABLES"),
    ("Müşteri Sözleşmelerinden Doğan Varlıklar (Dönen)", "CURRENT_ASSETS_FROM_CUSTOMER_CONTRACTS"),
    ("İmtiyaz Sözleşmelerine İlişkin Finansal Varlıklar (Dönen)", "CURRENT_FINANCIAL_ASSETS_FROM_CONCESSION_CONTRACTS"),
    ("Türev Araçlar (Dönen)", "CURRENT_DERIVATIVE_INSTRUMENTS"),
    ("Stoklar (Dönen)", "CURRENT_INVENTORIES"),
    ("Proje Halindeki Stoklar", "CURRENT_INVENTORIES_IN_PROGRESS"),
    ("Canlı Varlıklar (Dönen)", "CURRENT_BIOLOGICAL_ASSETS"),
    ("Peşin Ödenmiş Giderler (Dönen)", "CURRENT_PREPAID_EXPENSES"),
    ("Ertelenmiş Sigortacılık Üretim Giderleri", "CURRENT_DEFERRED_INSURANCE_PRODUCTION_COSTS"),
    ("Cari Dönem Vergisiyle İlgili Varlıklar", "CURRENT_TAX_ASSETS"),
    ("Nakit Dışı Serbest Kullanılabilir Teminatlar (Dönen)", "CURRENT_NON_CASH_FREELY_USABLE_COLLATERALS"),
    ("Diğer Dönen Varlıklar", "OTHER_CURRENT_ASSETS"),
    ("Satış Amacıyla Elde Tutulan Duran Varlıklar", "CURRENT_ASSETS_HELD_FOR_SALE"),
    ("Ortaklara Dağıtılmak Üzere Elde Tutulan Duran Varlıklar", "CURRENT_ASSETS_HELD_FOR_DISTRIBUTION_TO_OWNERS"),
    ("Toplam Dönen Varlıklar", "TOTAL_CURRENT_ASSETS"),
    // Fixed assets
    ("Finansal Yatırımlar (Duran)", "FINANCIAL_INVESTMENTS_FIXED"),
    ("İştirakler, İş Ortaklıkları ve Bağlı Ortaklıklardaki Yatırımlar", "FIXED_INVESTMENTS_IN_ASSOCIATES_JOINT_VENTURES_AND_SUBSIDIARIES"),
    ("Ticari Alacaklar (Duran)", "FIXED_TRADE_RECEIVABLES"),
    ("Finans Sektörü Faaliyetlerinden Alacaklar (Duran)", "FIXED_FINANCIAL_SECTOR_RECEIVABLES"),
    ("Diğer Alacaklar (Duran)", "FIXED_OTHER_RECEIVABLES"),
    ("Müşteri Sözleşmelerinden Doğan Varlıklar (Duran)", "FIXED_ASSETS_FROM_CUSTOMER_CONTRACTS"),
    ("İmtiyaz Sözleşmelerine İlişkin Finansal Varlıklar (Duran)", "FIXED_FINANCIAL_ASSETS_FROM_CONCESSION_CONTRACTS"),
    ("Türev Araçlar (Duran)", "FIXED_DERIVATIVE_INSTRUMENTS"),
    ("Stoklar (Duran)", "FIXED_INVENTORIES"),
    ("Özkaynak Yöntemiyle Değerlenen Yatırımlar", "FIXED_EQUITY_METHOD_INVESTMENTS"),
    ("Canlı Varlıklar (Duran)", "FIXED_BIOLOGICAL_ASSETS"),
    ("Yatırım Amaçlı Gayrimenkuller", "FIXED_INVESTMENT_PROPERTIES"),
    ("Proje Halindeki Yatırım Amaçlı Gayrimenkuller", "FIXED_INVESTMENT_PROPERTIES_IN_PROGRESS"),
    ("Maddi Duran Varlıklar", "FIXED_TANGIBLE_ASSETS"),
    ("Kullanım Hakkı Varlıkları", "FIXED_RIGHT_OF_USE_ASSETS"),
    ("Maddi Olmayan Duran Varlıklar", "FIXED_INTANGIBLE_ASSETS"),
    ("Peşin Ödenmiş Giderler (Duran)", "FIXED_PREPAID_EXPENSES"),
    ("Ertelenmiş Vergi Varlığı", "FIXED_DEFERRED_TAX_ASSETS"),
    ("Cari Dönem Vergisiyle İlgili Duran Varlıklar", "FIXED_CURRENT_PERIOD_TAX_ASSETS"),
    ("Nakit Dışı Serbest Kullanılabilir Teminatlar (Duran)", "FIXED_NON_CASH_FREELY_USABLE_COLLATERALS"),
    ("Diğer Duran Varlıklar", "OTHER_FIXED_ASSETS"),
    ("Toplam Duran Varlıklar", "TOTAL_FIXED_ASSETS"),
    ("Toplam Varlıklar", "TOTAL_ASSETS"),
    // Short-term liabilities
    ("Finansal Borçlar (Kısa Vadeli)", "SHORT_TERM_FINANCIAL_BORROWINGS"),
    ("Diğer Finansal Yükümlülükler (Kısa Vadeli)", "SHORT_TERM_OTHER_FINANCIAL_LIABILITIES"),
    ("Ticari Borçlar (Kısa Vadeli)", "SHORT_TERM_TRADE_PAYABLES"),
    ("Finans Sektörü Faaliyetlerinden Borçlar (Kısa Vadeli)", "SHORT_TERM_FINANCIAL_SECTOR_LIABILITIES"),
    ("Çalışanlara Sağlanan Faydalar Kapsamında Borçlar (Kısa Vadeli)", "SHORT_TERM_EMPLOYEE_BENEFITS_LIABILITIES"),
    ("Diğer Borçlar (Kısa Vadeli)", "SHORT_TERM_OTHER_BORROWINGS"),
    ("Müşteri Sözleşmelerinden Doğan Yükümlülükler (Kısa Vadeli)", "SHORT_TERM_LIABILITIES_FROM_CUSTOMER_CONTRACTS"),
    ("Özkaynak Yöntemiyle Değerlenen Yatırımlardan Yükümlülükler (Kısa Vadeli)", "SHORT_TERM_LIABILITIES_FROM_EQUITY_METHOD_INVESTMENTS"),
    ("Türev Araçlar (Kısa Vadeli)", "SHORT_TERM_DERIVATIVE_LIABILITIES"),
    ("Devlet Teşvik ve Yardımları (Kısa Vadeli)", "SHORT_TERM_GOVERNMENT_GRANTS_AND_AIDS"),
    ("Ertelenmiş Gelirler (Kısa Vadeli)", "SHORT_TERM_DEFERRED_INCOME"),
    ("Dönem Karı Vergi Yükümlülüğü", "SHORT_TERM_INCOME_TAX_LIABILITIES"),
    ("Kısa Vadeli Karşılıklar", "SHORT_TERM_PROVISIONS"),
    ("Diğer Kısa Vadeli Yükümlülükler", "OTHER_SHORT_TERM_LIABILITIES"),
    ("Satış Amaçlı Sınıflandırılan Varlık Gruplarına İlişkin Yükümlülükler", "SHORT_TERM_LIABILITIES_RELATING_TO_ASSETS_CLASSIFIED_AS_HELD_FOR_SALE"),
    ("Ortaklara Dağıtılmak Üzere Elde Tutulan Varlık Gruplarına İlişkin Yükümlülükler", "SHORT_TERM_LIABILITIES_RELATING_TO_ASSETS_HELD_FOR_DISTRIBUTION_TO_OWNERS"),
    ("Toplam Kısa Vadeli Yükümlülükler", "TOTAL_SHORT_TERM_LIABILITIES"),
    // Long-term liabilities
    ("Finansal Borçlar (Uzun Vadeli)", "LONG_TERM_FINANCIAL_BORROWINGS"),
    ("Diğer Finansal Yükümlülükler (Uzun Vadeli)", "LONG_TERM_OTHER_FINANCIAL_LIABILITIES"),
    ("Ticari Borçlar (Uzun Vadeli)", "LONG_TERM_TRADE_PAYABLES"),
    ("Finans Sektörü Faaliyetlerinden Borçlar (Uzun Vadeli)", "LONG_TERM_FINANCIAL_SECTOR_LIABILITIES"),
    ("Çalışanlara Sağlanan Faydalar Kapsamında Borçlar (Uzun Vadeli)", "LONG_TERM_EMPLOYEE_BENEFITS_LIABILITIES"),
    ("Diğer Borçlar (Uzun Vadeli)", "LONG_TERM_OTHER_BORROWINGS"),
    ("Müşteri Sözleşmelerinden Doğan Yükümlülükler (Uzun Vadeli)", "LONG_TERM_LIABILITIES_FROM_CUSTOMER_CONTRACTS"),
    ("Devlet Teşvik ve Yardımları (Uzun Vadeli)", "LONG_TERM_GOVERNMENT_GRANTS_AND_AIDS"),
    ("Özkaynak Yöntemiyle Değerlenen Yatırımlardan Yükümlülükler (Uzun Vadeli)", "LONG_TERM_LIABILITIES_FROM_EQUITY_METHOD_INVESTMENTS"),
    ("Türev Araçlar (Uzun Vadeli)", "LONG_TERM_DERIVATIVE_LIABILITIES"),
    ("Ertelenmiş Gelirler (Uzun Vadeli)", "LONG_TERM_DEFERRED_INCOME"),
    ("Uzun vadeli Karşılıklar", "LONG_TERM_PROVISIONS"),
    ("Cari Dönem Vergisiyle İlgili Borçlar", "LONG_TERM_CURRENT_PERIOD_TAX_LIABILITIES"),
    ("Ertelenmiş Vergi Yükümlülüğü", "LONG_TERM_DEFERRED_TAX_LIABILITIES"),
    ("Diğer Uzun Vadeli Yükümlülükler", "OTHER_LONG_TERM_LIABILITIES"),
    ("Toplam Uzun Vadeli Yükümlülükler", "TOTAL_LONG_TERM_LIABILITIES"),
    ("Toplam Yükümlülükler", "TOTAL_LIABILITIES"),
    // Equity
    ("Ana Ortaklığa Ait Özkaynaklar", "EQUITY_ATTRIBUTABLE_TO_OWNERS_OF_PARENT"),
    ("Ödenmiş Sermaye", "PAID_IN_CAPITAL"),
    ("Sermaye Düzeltme Farkları", "CAPITAL_ADJUSTMENT_DIFFERENCES"),
    ("Birleşme Denkleştirme Hesabı", "MERGER_EQUALISATION_ACCOUNT"),
    ("Pay Sahiplerinin İlave Sermaye Katkıları", "ADDITIONAL_PAID_IN_CAPITAL"),
    ("Sermaye Avansı", "CAPITAL_ADVANCE"),
    ("Geri Alınmış Paylar (-)", "TREASURY_SHARES"),
    ("Karşılıklı İştirak Sermaye Düzeltmesi (-)", "RECIPROCAL_INVESTMENT_CAPITAL_ADJUSTMENT"),
    ("Paylara İlişkin Primler (İskontolar)", "SHARE_PREMIUMS"),
    ("Ortak Kontrole Tabi Teşebbüs veya İşletmeleri İçeren Birleşmelerin Etkisi", "EFFECT_OF_BUSINESS_COMBINATIONS_UNDER_COMMON_CONTROL"),
    ("Pay Bazlı Ödemeler (-)", "SHARE_BASED_PAYMENTS"),
    ("Kar veya Zararda Yeniden Sınıflandırılmayacak Birikmiş Diğer Kapsamlı Gelirler (Giderler)", "ACCUMULATED_OTHER_COMPREHENSIVE_INCOME_NOT_RECLASSIFIED"),
    ("Kar veya Zararda Yeniden Sınıflandırılacak Birikmiş Diğer Kapsamlı Gelirler (Giderler)", "ACCUMULATED_OTHER_COMPREHENSIVE_INCOME_RECLASSIFIED"),
    ("Kardan Ayrılan Kısıtlanmış Yedekler", "RESTRICTED_RESERVES_APPROPRIATED_FROM_PROFIT"),
    ("Diğer Özkaynak Payları", "OTHER_EQUITY_INTERESTS"),
    ("Diğer Yedekler", "OTHER_RESERVES"),
    ("Ödenen Kar Payı Avansları (Net) (-)", "DIVIDEND_ADVANCES_PAID_NET"),
    ("Geçmiş Yıllar Kar/Zararları", "RETAINED_EARNINGS"),
    ("Dönem Net Kar/Zararı", "PROFIT_OR_LOSS_FOR_THE_PERIOD"),
    ("Azınlık Payları", "NON_CONTROLLING_INTERESTS"),
    ("Toplam Özkaynaklar", "TOTAL_EQUITY"),
    ("Toplam Kaynaklar", "TOTAL_RESOURCES"),
    ("Hedge Dahil Net Yabancı Para Pozisyonu", "NET_FOREIGN_CURRENCY_POSITION_INCLUDING_HEDGE"),
];

fn translation_map() -> &'static HashMap<&'static str, &'static str> {
    static MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    MAP.get_or_init(|| ACCOUNT_TRANSLATIONS.iter().copied().collect())
}

/// Translate a trimmed source label to its canonical account code.
pub fn translate(label: &str) -> Option<&'static str> {
    translation_map().get(label.trim()).copied()
}
