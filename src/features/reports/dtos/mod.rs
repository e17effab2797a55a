mod report_dto;
mod wizard_dto;

pub use report_dto::{
    CreateReportDto, MapMarkerDto, ReportFilterQuery, ReportResponseDto, ReportStatsDto,
    UpdateReportDto,
};
pub use wizard_dto::{
    WizardConfirmationDto, WizardDetailsDto, WizardLocationDto, WizardSessionDto,
};
